use std::env;

pub use common::Environment;
use inference::DetectorConfig;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub environment: Environment,
    pub addr: String,
    pub max_upload_bytes: usize,
    pub request_timeout_secs: u64,
    pub class_names_path: Option<String>,
    pub detector: DetectorConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        let addr = env::var("GATEWAY_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(25 * 1024 * 1024);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let class_names_path = env::var("CLASS_NAMES_PATH").ok();

        Self {
            environment,
            addr,
            max_upload_bytes,
            request_timeout_secs,
            class_names_path,
            detector: DetectorConfig::from_env(),
        }
    }
}
