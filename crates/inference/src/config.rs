use std::env;

pub const DEFAULT_INPUT_SIZE: (u32, u32) = (640, 640);

#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub model_path: String,
    pub input_size: (u32, u32),
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
}

impl DetectorConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let model_path = env::var("MODEL_PATH").unwrap_or_else(|_| "models/best.onnx".to_string());

        let input_width = env::var("INPUT_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_INPUT_SIZE.0);

        let input_height = env::var("INPUT_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_INPUT_SIZE.1);

        let confidence_threshold = env::var("CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.25);

        let iou_threshold = env::var("IOU_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.45);

        Self {
            model_path,
            input_size: (input_width, input_height),
            confidence_threshold,
            iou_threshold,
        }
    }

    /// Create default configuration for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        Self {
            model_path: "models/best.onnx".to_string(),
            input_size: DEFAULT_INPUT_SIZE,
            confidence_threshold: 0.25,
            iou_threshold: 0.45,
        }
    }
}
