use crate::config::DEFAULT_INPUT_SIZE;
use crate::errors::InferenceError;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use ndarray::{Array, IxDyn};

const LETTERBOX_COLOR: u8 = 114;

/// Geometry of the letterbox transform, needed by postprocessing to map
/// box coordinates back into the original image.
#[derive(Debug, Clone, Copy)]
pub struct LetterboxParams {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

pub struct PreProcessor {
    pub input_size: (u32, u32),
    rgb_buffer: Vec<u8>,
    letterboxed_buffer: Vec<u8>,
}

impl PreProcessor {
    pub fn new(input_size: (u32, u32)) -> Self {
        Self {
            input_size,
            rgb_buffer: Vec::with_capacity(1920 * 1080 * 3),
            letterboxed_buffer: vec![LETTERBOX_COLOR; (input_size.0 * input_size.1 * 3) as usize],
        }
    }

    /// Letterbox an RGB pixel buffer into the model input size and scale it
    /// to a `[1, 3, H, W]` f32 tensor in [0, 1].
    pub fn preprocess(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(Array<f32, IxDyn>, LetterboxParams), InferenceError> {
        if width == 0 || height == 0 {
            return Err(InferenceError::EmptyImage);
        }

        tracing::trace!(width, height, pixel_bytes = pixels.len(), "Preprocessing image");

        self.copy_rgb_pixels(pixels, width, height)?;

        let params = self.resize_and_letterbox(width, height)?;

        let input = self.normalize()?;

        Ok((input, params))
    }

    fn copy_rgb_pixels(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), InferenceError> {
        let expected_size = (width * height * 3) as usize;

        if pixels.len() != expected_size {
            return Err(InferenceError::SizeMismatch {
                expected: expected_size,
                actual: pixels.len(),
            });
        }

        self.rgb_buffer.clear();
        self.rgb_buffer.extend_from_slice(pixels);

        Ok(())
    }

    fn resize_and_letterbox(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<LetterboxParams, InferenceError> {
        let scale =
            (self.input_size.0 as f32 / width as f32).min(self.input_size.1 as f32 / height as f32);
        let new_width = ((width as f32 * scale) as u32).max(1);
        let new_height = ((height as f32 * scale) as u32).max(1);

        let offset_x = (self.input_size.0 - new_width) / 2;
        let offset_y = (self.input_size.1 - new_height) / 2;

        let src = Image::from_slice_u8(width, height, &mut self.rgb_buffer, PixelType::U8x3)
            .map_err(|e| InferenceError::Preprocess(e.to_string()))?;

        let mut resized = Image::new(new_width, new_height, PixelType::U8x3);

        Resizer::new()
            .resize(
                &src,
                &mut resized,
                &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
            )
            .map_err(|e| InferenceError::Preprocess(e.to_string()))?;

        self.letterboxed_buffer.fill(LETTERBOX_COLOR);

        let resized_data = resized.buffer();
        let stride = self.input_size.0 * 3;

        for y in 0..new_height {
            let src_row = (y * new_width * 3) as usize;
            let dst_row = ((y + offset_y) * stride + offset_x * 3) as usize;

            self.letterboxed_buffer[dst_row..dst_row + (new_width * 3) as usize]
                .copy_from_slice(&resized_data[src_row..src_row + (new_width * 3) as usize]);
        }

        Ok(LetterboxParams {
            scale,
            offset_x: offset_x as f32,
            offset_y: offset_y as f32,
        })
    }

    fn normalize(&self) -> Result<Array<f32, IxDyn>, InferenceError> {
        let width = self.input_size.0 as usize;
        let height = self.input_size.1 as usize;
        let spatial = width * height;

        let mut output = vec![0.0f32; 3 * spatial];

        for (i, px) in self.letterboxed_buffer.chunks_exact(3).enumerate() {
            output[i] = px[0] as f32 / 255.0;
            output[i + spatial] = px[1] as f32 / 255.0;
            output[i + 2 * spatial] = px[2] as f32 / 255.0;
        }

        Array::from_shape_vec(IxDyn(&[1, 3, height, width]), output)
            .map_err(|e| InferenceError::Preprocess(e.to_string()))
    }
}

impl Default for PreProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_SIZE)
    }
}
