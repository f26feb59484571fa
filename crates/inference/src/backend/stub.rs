use super::{InferenceBackend, InferenceOutput};
use crate::errors::{InferenceError, ModelLoadError};
use ndarray::{Array, IxDyn};

/// Backend that returns a canned prediction tensor regardless of input.
///
/// Used to exercise the detection pipeline without a model artifact.
pub struct StubBackend {
    predictions: ndarray::ArrayD<f32>,
}

impl StubBackend {
    /// Stub with the given raw prediction tensor `[1, 4 + classes, anchors]`.
    pub fn with_predictions(predictions: ndarray::ArrayD<f32>) -> Self {
        Self { predictions }
    }

    /// Stub that predicts nothing: one anchor with all class scores at zero.
    pub fn empty(num_classes: usize) -> Self {
        Self {
            predictions: Array::zeros(IxDyn(&[1, 4 + num_classes, 1])),
        }
    }
}

impl InferenceBackend for StubBackend {
    fn load_model(_path: &str) -> Result<Self, ModelLoadError> {
        Ok(Self::empty(6))
    }

    fn infer(&mut self, _input: &Array<f32, IxDyn>) -> Result<InferenceOutput, InferenceError> {
        Ok(InferenceOutput {
            predictions: self.predictions.clone(),
        })
    }
}
