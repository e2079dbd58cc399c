//! HTTP gateway (Axum) for detection requests.
//!
//! Used by the `sigdetect` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::detect_handler;
pub use state::HandlerState;

use crate::constants::SIGDETECT_STATUS_HEADER;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/detect", post(detect_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    /// `loaded` once the first detection has constructed the model, `lazy` before.
    pub engine: &'static str,
    /// `stub`, `model`, or `unknown` before first use.
    pub engine_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(SIGDETECT_STATUS_HEADER, HeaderValue::from_static("healthy"));

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Always ready: the model loads on first use, so an unloaded engine is not an error.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let engine = state.orchestrator.engine();

    let components = ComponentStatus {
        http: "ready",
        engine: if engine.is_loaded() { "loaded" } else { "lazy" },
        engine_mode: match engine.is_stub() {
            Some(true) => "stub",
            Some(false) => "model",
            None => "unknown",
        },
    };

    let mut headers = HeaderMap::new();
    headers.insert(SIGDETECT_STATUS_HEADER, HeaderValue::from_static("ready"));

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
