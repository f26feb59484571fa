use crate::errors::RenderError;
use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use inference::{ClassNameTable, Detection};

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const STROKE_WIDTH: i32 = 2;
const FONT_SCALE: f32 = 20.0;
// Gap between the box's top edge and the label background when the label
// is placed above the box.
const LABEL_GAP: i32 = 10;
// Padding around the label text inside its background.
const LABEL_PADDING: i32 = 4;

static FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Draws detection boxes and class labels onto a copy of an image.
pub struct Annotator {
    font: FontRef<'static>,
    scale: PxScale,
}

impl Annotator {
    pub fn new() -> Self {
        let font = FontRef::try_from_slice(FONT_BYTES).expect("embedded font is valid");
        Self {
            font,
            scale: PxScale::from(FONT_SCALE),
        }
    }

    /// Render `detections` onto a copy of `image`, in the order received.
    ///
    /// Each detection gets a hollow green box and a `"{name} {conf:.2}"`
    /// label on a filled background, placed above the box when there is
    /// room and below its top edge otherwise. A class id outside the table
    /// fails with [`RenderError::ClassIdOutOfRange`].
    pub fn annotate(
        &self,
        image: &RgbImage,
        detections: &[Detection],
        class_names: &ClassNameTable,
    ) -> Result<RgbImage, RenderError> {
        let mut canvas = image.clone();

        for det in detections {
            let name =
                class_names
                    .get(det.class_id)
                    .ok_or(RenderError::ClassIdOutOfRange {
                        class_id: det.class_id,
                        num_classes: class_names.len(),
                    })?;

            let label = build_label(name, det.confidence);
            self.draw_detection(&mut canvas, det, &label);
        }

        Ok(canvas)
    }

    fn draw_detection(&self, canvas: &mut RgbImage, det: &Detection, label: &str) {
        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        if w < 2 || h < 2 {
            return;
        }

        let x1 = (det.x1.round() as i32).clamp(0, w - 1);
        let y1 = (det.y1.round() as i32).clamp(0, h - 1);
        let x2 = (det.x2.round() as i32).clamp(0, w - 1);
        let y2 = (det.y2.round() as i32).clamp(0, h - 1);

        if x1 >= x2 || y1 >= y2 {
            tracing::debug!(?det, "Skipping degenerate box");
            return;
        }

        // Box outline, one nested hollow rect per stroke pixel
        for t in 0..STROKE_WIDTH {
            let bw = (x2 - x1 - 2 * t) as u32;
            let bh = (y2 - y1 - 2 * t) as u32;
            if bw == 0 || bh == 0 {
                break;
            }
            let rect = Rect::at(x1 + t, y1 + t).of_size(bw, bh);
            draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
        }

        let (text_w, text_h) = text_size(self.scale, &self.font, label);
        let label_w = text_w as i32 + 2 * LABEL_PADDING;
        let label_h = text_h as i32 + 2 * LABEL_PADDING;

        let label_x = x1.clamp(0, (w - label_w).max(0));
        let label_y = label_origin(y1, label_h).clamp(0, (h - label_h).max(0));

        // Clip the background to the image; skip the label entirely if the
        // image is too small to hold any of it.
        let bg_w = label_w.min(w - label_x);
        let bg_h = label_h.min(h - label_y);
        if bg_w <= 0 || bg_h <= 0 {
            return;
        }

        let bg = Rect::at(label_x, label_y).of_size(bg_w as u32, bg_h as u32);
        draw_filled_rect_mut(canvas, bg, BOX_COLOR);

        draw_text_mut(
            canvas,
            TEXT_COLOR,
            label_x + LABEL_PADDING,
            label_y + LABEL_PADDING,
            self.scale,
            &self.font,
            label,
        );
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

fn build_label(name: &str, confidence: f32) -> String {
    format!("{} {:.2}", name, confidence)
}

/// Top edge of the label background: `LABEL_GAP` above the box when that
/// keeps the whole label inside the image, otherwise just below the box's
/// top edge.
fn label_origin(y1: i32, label_h: i32) -> i32 {
    if y1 - LABEL_GAP - label_h >= 0 {
        y1 - LABEL_GAP - label_h
    } else {
        y1 + STROKE_WIDTH
    }
}
