use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use tracing::{Span, debug, field, instrument};

use crate::constants::SIGDETECT_STATUS_HEADER;
use crate::detection::Batch;

use super::error::GatewayError;
use super::state::HandlerState;

/// `POST /v1/detect`: runs one batch and returns its report.
#[instrument(skip(state, request), fields(documents = field::Empty))]
pub async fn detect_handler(
    State(state): State<HandlerState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let batch: Batch = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;
    Span::current().record("documents", batch.documents.len());
    debug!("Processing detection request");

    let report = state.orchestrator.run(&batch).await?;

    let mut headers = HeaderMap::new();
    headers.insert(SIGDETECT_STATUS_HEADER, HeaderValue::from_static("ok"));
    Ok((headers, Json(report)).into_response())
}
