use crate::errors::InferenceError;
use crate::processing::pre::LetterboxParams;

/// One predicted object in original-image pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub confidence: f32,
    pub class_id: u32,
}

pub struct TransformParams {
    pub orig_width: u32,
    pub orig_height: u32,
    pub letterbox: LetterboxParams,
}

pub struct PostProcessor {
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
}

impl PostProcessor {
    pub fn new(confidence_threshold: f32, iou_threshold: f32) -> Self {
        Self {
            confidence_threshold,
            iou_threshold,
        }
    }

    /// Decode a raw YOLO prediction tensor `[1, 4 + classes, anchors]` into
    /// detections mapped back to the original image.
    ///
    /// The box channels are cxcywh in model-input pixels; the remaining
    /// channels are per-class scores. Each anchor gets the argmax class, low
    /// scores are dropped, coordinates are un-letterboxed and clamped, and
    /// overlapping same-class boxes are suppressed.
    pub fn parse_detections(
        &self,
        predictions: &ndarray::ArrayViewD<f32>,
        transform: &TransformParams,
    ) -> Result<Vec<Detection>, InferenceError> {
        let shape = predictions.shape();
        if shape.len() != 3 || shape[0] != 1 || shape[1] < 5 {
            return Err(InferenceError::OutputShape {
                actual: shape.to_vec(),
            });
        }

        let num_classes = shape[1] - 4;
        let num_anchors = shape[2];

        let LetterboxParams {
            scale,
            offset_x,
            offset_y,
        } = transform.letterbox;

        let mut detections = Vec::new();

        for i in 0..num_anchors {
            // Argmax over the class score channels
            let mut confidence = f32::NEG_INFINITY;
            let mut class_id = 0u32;
            for c in 0..num_classes {
                let score = predictions[[0, 4 + c, i]];
                if score > confidence {
                    confidence = score;
                    class_id = c as u32;
                }
            }

            if confidence < self.confidence_threshold {
                continue;
            }

            let cx = predictions[[0, 0, i]];
            let cy = predictions[[0, 1, i]];
            let w = predictions[[0, 2, i]];
            let h = predictions[[0, 3, i]];

            let (bx1, by1, bx2, by2) = cxcywh_to_xyxy(cx, cy, w, h);

            let x1 = ((bx1 - offset_x) / scale)
                .max(0.0)
                .min(transform.orig_width as f32);
            let y1 = ((by1 - offset_y) / scale)
                .max(0.0)
                .min(transform.orig_height as f32);
            let x2 = ((bx2 - offset_x) / scale)
                .max(0.0)
                .min(transform.orig_width as f32);
            let y2 = ((by2 - offset_y) / scale)
                .max(0.0)
                .min(transform.orig_height as f32);

            detections.push(Detection {
                x1,
                y1,
                x2,
                y2,
                confidence,
                class_id,
            });
        }

        Ok(non_maximum_suppression(detections, self.iou_threshold))
    }
}

/// Convert bounding box from center-width-height format to corner format
#[inline]
fn cxcywh_to_xyxy(cx: f32, cy: f32, w: f32, h: f32) -> (f32, f32, f32, f32) {
    let x1 = cx - w / 2.0;
    let y1 = cy - h / 2.0;
    let x2 = cx + w / 2.0;
    let y2 = cy + h / 2.0;
    (x1, y1, x2, y2)
}

fn iou(a: &Detection, b: &Detection) -> f32 {
    let ix1 = a.x1.max(b.x1);
    let iy1 = a.y1.max(b.y1);
    let ix2 = a.x2.min(b.x2);
    let iy2 = a.y2.min(b.y2);

    let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
    if inter <= 0.0 {
        return 0.0;
    }

    let area_a = (a.x2 - a.x1).max(0.0) * (a.y2 - a.y1).max(0.0);
    let area_b = (b.x2 - b.x1).max(0.0) * (b.y2 - b.y1).max(0.0);

    inter / (area_a + area_b - inter)
}

/// Greedy per-class non-maximum suppression. Keeps the highest-confidence
/// box of each overlapping cluster; output is sorted by descending
/// confidence.
fn non_maximum_suppression(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    detections.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<Detection> = Vec::with_capacity(detections.len());

    for det in detections {
        let suppressed = kept
            .iter()
            .any(|k| k.class_id == det.class_id && iou(k, &det) > iou_threshold);
        if !suppressed {
            kept.push(det);
        }
    }

    kept
}
