use crate::error::ApiError;
use annotate::Annotator;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use inference::{ClassNameTable, ColorFormat, Detector, InferenceBackend, pixel};
use std::io::Cursor;

/// The whole per-image contract: decode, detect, draw, re-encode, base64.
///
/// Uploaded bytes may be any format the image crate can decode; the output
/// is always a base64-encoded JPEG of the annotated image.
pub fn annotate_one<B: InferenceBackend>(
    detector: &Detector<B>,
    annotator: &Annotator,
    class_names: &ClassNameTable,
    bytes: &[u8],
) -> Result<String, ApiError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| ApiError::BadRequest(format!("could not decode uploaded image: {e}")))?
        .to_rgb8();

    let detections = detector.detect(&image)?;

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        detections = detections.len(),
        "Annotating image"
    );

    let annotated = annotator.annotate(&image, &detections, class_names)?;

    let jpeg = encode_jpeg(
        annotated.as_raw(),
        annotated.width(),
        annotated.height(),
        ColorFormat::Rgb,
    )?;

    Ok(BASE64.encode(&jpeg))
}

/// Encode a raw pixel buffer to JPEG, converting the channel order first
/// where needed.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: ColorFormat,
) -> Result<Vec<u8>, ApiError> {
    let img = pixel::rgb_from_raw(pixels, width, height, format)?;

    let mut jpeg_bytes = Cursor::new(Vec::new());
    img.write_to(&mut jpeg_bytes, image::ImageFormat::Jpeg)
        .map_err(|e| ApiError::Internal(format!("JPEG encoding failed: {e}")))?;

    Ok(jpeg_bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use inference::DetectorConfig;
    use inference::backend::stub::StubBackend;
    use ndarray::{Array, IxDyn};

    fn test_config() -> DetectorConfig {
        DetectorConfig {
            model_path: "unused".to_string(),
            input_size: (640, 640),
            confidence_threshold: 0.25,
            iou_threshold: 0.45,
        }
    }

    fn png_bytes(image: &RgbImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_annotate_one_produces_base64_jpeg() {
        let detector = Detector::new(StubBackend::empty(6), &test_config());
        let annotator = Annotator::new();
        let table = ClassNameTable::waste_default();

        let image = RgbImage::from_pixel(32, 32, image::Rgb([90, 120, 150]));
        let encoded = annotate_one(&detector, &annotator, &table, &png_bytes(&image)).unwrap();

        let jpeg = BASE64.decode(encoded).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "JPEG SOI marker expected");
    }

    #[test]
    fn test_annotate_one_with_detection_draws_boxes() {
        // Stub emits one box covering (10,10)-(50,50) of a 64x64 image
        // (letterbox scale is 10 with no offsets).
        let mut predictions = Array::zeros(IxDyn(&[1, 10, 1]));
        predictions[[0, 0, 0]] = 300.0;
        predictions[[0, 1, 0]] = 300.0;
        predictions[[0, 2, 0]] = 400.0;
        predictions[[0, 3, 0]] = 400.0;
        predictions[[0, 4, 0]] = 0.87;

        let detector = Detector::new(StubBackend::with_predictions(predictions), &test_config());
        let annotator = Annotator::new();
        let table = ClassNameTable::waste_default();

        let image = RgbImage::new(64, 64);
        let encoded = annotate_one(&detector, &annotator, &table, &png_bytes(&image)).unwrap();

        let jpeg = BASE64.decode(encoded).unwrap();
        let out = image::load_from_memory(&jpeg).unwrap().to_rgb8();
        assert_eq!(out.dimensions(), (64, 64));

        // Box edge pixel leans strongly green even after JPEG loss
        let px = out.get_pixel(10, 30).0;
        assert!(px[1] > 150, "expected green box edge, got {px:?}");
        assert!(px[1] > px[0] + 50 && px[1] > px[2] + 50);
    }

    #[test]
    fn test_annotate_one_rejects_garbage_bytes() {
        let detector = Detector::new(StubBackend::empty(6), &test_config());
        let annotator = Annotator::new();
        let table = ClassNameTable::waste_default();

        let err = annotate_one(&detector, &annotator, &table, b"not an image").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_encode_jpeg_bgr_input_is_converted() {
        // Solid red stored as BGR bytes (B=0, G=0, R=255)
        let pixels: Vec<u8> = [0u8, 0, 255].repeat(16 * 16);
        let jpeg = encode_jpeg(&pixels, 16, 16, ColorFormat::Bgr).unwrap();

        let out = image::load_from_memory(&jpeg).unwrap().to_rgb8();
        let px = out.get_pixel(8, 8).0;
        assert!(px[0] > 200, "red channel should dominate, got {px:?}");
        assert!(px[2] < 60, "blue channel should be near zero, got {px:?}");
    }

    #[test]
    fn test_no_detections_roundtrip_within_jpeg_tolerance() {
        let detector = Detector::new(StubBackend::empty(6), &test_config());
        let annotator = Annotator::new();
        let table = ClassNameTable::waste_default();

        let image = RgbImage::from_fn(48, 48, |x, y| {
            image::Rgb([(x * 5) as u8, (y * 5) as u8, 128])
        });

        let encoded = annotate_one(&detector, &annotator, &table, &png_bytes(&image)).unwrap();
        let jpeg = BASE64.decode(encoded).unwrap();
        let out = image::load_from_memory(&jpeg).unwrap().to_rgb8();

        assert_eq!(out.dimensions(), image.dimensions());

        let total_diff: u64 = image
            .as_raw()
            .iter()
            .zip(out.as_raw())
            .map(|(a, b)| a.abs_diff(*b) as u64)
            .sum();
        let mean_diff = total_diff as f64 / image.as_raw().len() as f64;
        assert!(mean_diff < 8.0, "JPEG round-trip drifted too far: {mean_diff}");
    }
}
