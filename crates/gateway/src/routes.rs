use crate::config::GatewayConfig;
use crate::handlers::{health, predict};
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use inference::InferenceBackend;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Create the API router.
pub fn create_router<B: InferenceBackend + Send + 'static>(
    state: AppState<B>,
    config: &GatewayConfig,
) -> Router {
    Router::new()
        .route("/predict", post(predict::<B>))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .with_state(state)
}
