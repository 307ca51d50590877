//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every error body has the shape `{"error": {"code", "message"}}`; the
//! codes match the JSON-RPC adapter's. Internal details are never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use zkrpc_core::ProverError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "MALFORMED_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Body is not valid JSON, has the wrong shape, or carries bad base64 (400).
    #[error("malformed request: {0}")]
    BadRequest(String),

    /// The prover returned no proof (500).
    #[error("proof generation failed")]
    GenerationFailed,

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "MALFORMED_REQUEST"),
            Self::GenerationFailed => (StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_FAILED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::GenerationFailed => tracing::warn!("proof generation failed"),
            Self::BadRequest(_) => tracing::debug!(error = %self, "rejected request"),
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ProverError> for AppError {
    fn from(err: ProverError) -> Self {
        match err {
            ProverError::GenerationFailed => Self::GenerationFailed,
        }
    }
}
