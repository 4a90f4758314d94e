//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use helpline_core::relay::RelayError;
use serde::Serialize;
use thiserror::Error;

/// Generic message returned for every upstream failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str =
    "Failed to generate a response. Please try again later.";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed client input; the provider was not contacted.
    #[error("{0}")]
    InvalidRequest(String),

    /// The completion provider call failed; carries its description.
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidRequest(m) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: m,
                    details: None,
                },
            ),
            AppError::UpstreamFailure(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: UPSTREAM_FAILURE_MESSAGE.to_string(),
                    details: Some(details),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::Upstream(e) => AppError::UpstreamFailure(e.to_string()),
            invalid => AppError::InvalidRequest(invalid.to_string()),
        }
    }
}
