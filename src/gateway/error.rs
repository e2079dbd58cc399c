use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::SIGDETECT_STATUS_HEADER;
use crate::detection::DetectionError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Detection(#[from] DetectionError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub category: &'static str,
    pub code: u16,
}

impl GatewayError {
    pub fn category(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "invalid_input",
            GatewayError::Detection(err) => err.category(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Detection(err) => match err {
                DetectionError::InputFormat { .. } | DetectionError::InvalidInput { .. } => {
                    StatusCode::BAD_REQUEST
                }
                DetectionError::Acquisition { .. } => StatusCode::BAD_GATEWAY,
                DetectionError::ModelApplication { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let category = self.category();

        let mut headers = HeaderMap::new();
        headers.insert(SIGDETECT_STATUS_HEADER, HeaderValue::from_static(category));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            category,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
