use crate::errors::{InferenceError, ModelLoadError};
use ndarray::{Array, IxDyn};

#[cfg(feature = "ort-backend")]
pub mod ort;

pub mod stub;

/// Raw model output, one prediction tensor per forward pass.
pub struct InferenceOutput {
    /// `[1, 4 + num_classes, num_anchors]` - cxcywh in input pixels followed
    /// by per-class scores (YOLO single-output ONNX layout)
    pub predictions: ndarray::ArrayD<f32>,
}

pub trait InferenceBackend {
    /// Load the model artifact once, at process startup. A failure here is
    /// fatal; the caller must not serve traffic.
    fn load_model(path: &str) -> Result<Self, ModelLoadError>
    where
        Self: Sized;

    /// Run one forward pass over a preprocessed NCHW tensor.
    fn infer(&mut self, input: &Array<f32, IxDyn>) -> Result<InferenceOutput, InferenceError>;
}
