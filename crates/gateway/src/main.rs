use annotate::Annotator;
use gateway::{AppState, config::GatewayConfig, create_router, logging::setup_logging};
use inference::backend::ort::OrtBackend;
use inference::{ClassNameTable, Detector, InferenceBackend};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env();
    setup_logging(&config);

    tracing::info!(
        config = ?config,
        "Loaded configuration"
    );

    tracing::info!("Loading detection model");
    let backend = OrtBackend::load_model(&config.detector.model_path)?;
    tracing::info!("Model loaded successfully");

    let class_names = match &config.class_names_path {
        Some(path) => ClassNameTable::from_file(path)?,
        None => ClassNameTable::waste_default(),
    };
    tracing::info!(classes = class_names.len(), "Class-name table ready");

    let state = AppState {
        detector: Arc::new(Detector::new(backend, &config.detector)),
        annotator: Arc::new(Annotator::new()),
        class_names: Arc::new(class_names),
    };

    let app = create_router(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    tracing::info!("Listening on {}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
