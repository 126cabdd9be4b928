//! Request handlers.

use axum::extract::State;
use axum::Json;

use promocast_models::{CompositionRequest, HealthStatus, ProcessingResult};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health check endpoint (liveness probe), independent of composition.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}

/// Compose one video.
///
/// Composition failures are part of the result schema and still return
/// 200; only an unparsable payload is an HTTP-level error.
pub async fn process(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> ApiResult<Json<ProcessingResult>> {
    let request: CompositionRequest = serde_json::from_value(payload)
        .map_err(|e| ApiError::bad_request(format!("invalid request payload: {e}")))?;

    Ok(Json(state.composer.process(request).await))
}
