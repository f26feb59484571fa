use thiserror::Error;

/// Fatal startup failure: the model artifact could not be turned into a
/// usable session. The process must not serve traffic after this.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("failed to build inference session from {path}: {reason}")]
    Session { path: String, reason: String },
}

/// Per-request inference failure. Propagated to the caller; never crashes
/// the process.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("input image has zero width or height")]
    EmptyImage,

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("preprocessing failed: {0}")]
    Preprocess(String),

    #[error("inference session failed: {0}")]
    Session(String),

    #[error("unexpected model output shape {actual:?}, expected [1, 4 + classes, anchors]")]
    OutputShape { actual: Vec<usize> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formatting() {
        let err = ModelLoadError::Session {
            path: "models/best.onnx".to_string(),
            reason: "no such file".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to build inference session from models/best.onnx: no such file"
        );

        let err = InferenceError::SizeMismatch {
            expected: 12,
            actual: 9,
        };
        assert_eq!(
            err.to_string(),
            "pixel buffer size mismatch: expected 12 bytes, got 9"
        );

        let err = InferenceError::EmptyImage;
        assert_eq!(err.to_string(), "input image has zero width or height");
    }
}
