use crate::error::{ApiError, ApiResult};
use crate::pipeline;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Multipart, State};
use inference::InferenceBackend;
use serde::Serialize;

#[derive(Serialize)]
pub struct PredictResponse {
    pub image_base64: Vec<String>,
}

/// Annotate every uploaded file and return one base64 JPEG per upload, in
/// upload order. A batch is all-or-nothing: the first failing image fails
/// the request.
pub async fn predict<B: InferenceBackend + Send + 'static>(
    State(state): State<AppState<B>>,
    mut multipart: Multipart,
) -> ApiResult<Json<PredictResponse>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {e}")))?;
        uploads.push((file_name, bytes));
    }

    tracing::debug!(files = uploads.len(), "Processing predict request");

    let mut results = Vec::with_capacity(uploads.len());

    for (file_name, bytes) in uploads {
        let detector = state.detector.clone();
        let annotator = state.annotator.clone();
        let class_names = state.class_names.clone();

        // Decode + inference + drawing are CPU-bound; keep them off the
        // async runtime.
        let encoded = tokio::task::spawn_blocking(move || {
            pipeline::annotate_one(&detector, &annotator, &class_names, &bytes)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("annotation task failed: {e}")))?;

        match encoded {
            Ok(encoded) => results.push(encoded),
            Err(e) => {
                tracing::warn!(file_name = ?file_name, error = %e, "Failed to annotate upload");
                return Err(e);
            }
        }
    }

    Ok(Json(PredictResponse {
        image_base64: results,
    }))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
