//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every role answers failures with the same JSON body:
//!
//! ```json
//! { "error": { "code": "EMPTY_CREDENTIAL_SET", "message": "..." } }
//! ```
//!
//! Verification failures keep their own machine-readable code so a caller of
//! `/verify` can tell which stage stopped the run.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vcx_vc::{VcError, VerificationError};

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "NOT_FOUND", "NETWORK_FAILURE").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request parsed but its content is unusable (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// The verification run stopped on a fatal error (500).
    ///
    /// Unlike [`AppError::Internal`], the message is returned to the caller:
    /// it names the failed stage, which is the answer `/verify` owes.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Verification(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.code()),
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
            Self::Verification(_) => tracing::warn!(code, error = %self, "verification aborted"),
            _ => {}
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

/// Document errors raised while handling a request body are the caller's
/// fault; anything else that escapes a signing path is internal.
impl From<VcError> for AppError {
    fn from(err: VcError) -> Self {
        match err {
            VcError::MalformedDocument(_) | VcError::MissingProof => {
                Self::Validation(err.to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<vcx_core::ValidationError> for AppError {
    fn from(err: vcx_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
