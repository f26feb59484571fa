use crate::errors::InferenceError;
use image::{ImageBuffer, RgbImage};

/// Channel order of a raw 3-byte-per-pixel buffer. The decode and encode
/// boundaries of the pipeline disagree on ordering, so it is always carried
/// explicitly instead of being assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Rgb,
    Bgr,
}

/// Build an [`RgbImage`] from a raw interleaved pixel buffer, converting the
/// channel order where needed.
pub fn rgb_from_raw(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: ColorFormat,
) -> Result<RgbImage, InferenceError> {
    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(InferenceError::SizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let rgb_data = match format {
        ColorFormat::Rgb => pixels.to_vec(),
        ColorFormat::Bgr => {
            let mut rgb_data = Vec::with_capacity(pixels.len());
            for chunk in pixels.chunks_exact(3) {
                rgb_data.push(chunk[2]); // R
                rgb_data.push(chunk[1]); // G
                rgb_data.push(chunk[0]); // B
            }
            rgb_data
        }
    };

    ImageBuffer::from_raw(width, height, rgb_data).ok_or(InferenceError::SizeMismatch {
        expected,
        actual: pixels.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_passthrough() {
        let pixels = [10u8, 20, 30, 40, 50, 60];
        let img = rgb_from_raw(&pixels, 2, 1, ColorFormat::Rgb).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(img.get_pixel(1, 0).0, [40, 50, 60]);
    }

    #[test]
    fn test_bgr_swaps_red_and_blue() {
        let pixels = [30u8, 20, 10, 60, 50, 40];
        let img = rgb_from_raw(&pixels, 2, 1, ColorFormat::Bgr).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30], "B and R must swap");
        assert_eq!(img.get_pixel(1, 0).0, [40, 50, 60]);
    }

    #[test]
    fn test_bgr_leaves_green_untouched() {
        let pixels = [0u8, 255, 0];
        let img = rgb_from_raw(&pixels, 1, 1, ColorFormat::Bgr).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0]);
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let pixels = [0u8; 5];
        let err = rgb_from_raw(&pixels, 2, 1, ColorFormat::Rgb).unwrap_err();
        match err {
            InferenceError::SizeMismatch { expected, actual } => {
                assert_eq!(expected, 6);
                assert_eq!(actual, 5);
            }
            other => panic!("expected SizeMismatch, got {other}"),
        }
    }
}
