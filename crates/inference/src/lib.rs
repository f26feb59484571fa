pub mod backend;
pub mod classes;
pub mod config;
pub mod detector;
pub mod errors;
pub mod pixel;
pub mod processing;

// Re-export commonly used types for convenience
pub use backend::{InferenceBackend, InferenceOutput};
pub use classes::ClassNameTable;
pub use config::DetectorConfig;
pub use detector::Detector;
pub use errors::{InferenceError, ModelLoadError};
pub use pixel::ColorFormat;
pub use processing::post::Detection;
