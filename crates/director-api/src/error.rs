//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Returns JSON error bodies with a machine-readable code and a message.
//!
//! `Unauthorized` and `NotFound` are ordinary control-flow outcomes produced
//! by the gate and the fallback. `Internal` and `Unavailable` are faults:
//! their detail is logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "UNAUTHORIZED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing, malformed or rejected credential (401). The reason is for
    /// logs only; the response body never says which it was.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// No route matched (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Unexpected fault in a handler or the identity backend (500).
    #[error("internal error: {0}")]
    Internal(String),

    /// A dependency did not answer in time (503).
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }

    /// Message safe to return to the caller.
    fn public_message(&self) -> String {
        match self {
            Self::Unauthorized(_) => "authentication required".to_string(),
            Self::NotFound(path) => format!("no route matches {path}"),
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Unavailable(_) => "Service temporarily unavailable".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Unavailable(_) => tracing::error!(error = %self, "dependency unavailable"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.public_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}
