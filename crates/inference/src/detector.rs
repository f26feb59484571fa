use crate::backend::{InferenceBackend, InferenceOutput};
use crate::config::DetectorConfig;
use crate::errors::InferenceError;
use crate::processing::post::{Detection, PostProcessor, TransformParams};
use crate::processing::pre::PreProcessor;
use image::RgbImage;
use std::sync::{Mutex, PoisonError};

/// Process-wide detection pipeline: preprocess, forward pass, decode.
///
/// The session and its scratch buffers live behind a mutex; concurrent
/// `detect` calls serialize on it, so callers can share one `Detector`
/// for the process lifetime.
pub struct Detector<B: InferenceBackend> {
    inner: Mutex<Inner<B>>,
    postprocessor: PostProcessor,
}

struct Inner<B> {
    backend: B,
    preprocessor: PreProcessor,
}

impl<B: InferenceBackend> Detector<B> {
    pub fn new(backend: B, config: &DetectorConfig) -> Self {
        let postprocessor = PostProcessor::new(config.confidence_threshold, config.iou_threshold);
        let preprocessor = PreProcessor::new(config.input_size);

        Self {
            inner: Mutex::new(Inner {
                backend,
                preprocessor,
            }),
            postprocessor,
        }
    }

    /// Run detection over one decoded RGB image. The input is not mutated;
    /// output order is descending confidence after suppression.
    pub fn detect(&self, image: &RgbImage) -> Result<Vec<Detection>, InferenceError> {
        let width = image.width();
        let height = image.height();

        if width == 0 || height == 0 {
            return Err(InferenceError::EmptyImage);
        }

        let (output, letterbox) = {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

            let (input, letterbox) = inner.preprocessor.preprocess(image.as_raw(), width, height)?;

            let output = {
                let _span = tracing::info_span!("model_inference").entered();
                inner.backend.infer(&input)?
            };

            (output, letterbox)
        };

        let InferenceOutput { predictions } = output;

        let transform = TransformParams {
            orig_width: width,
            orig_height: height,
            letterbox,
        };

        let detections = self
            .postprocessor
            .parse_detections(&predictions.view(), &transform)?;

        tracing::debug!(width, height, detections = detections.len(), "Image processed");

        Ok(detections)
    }
}
