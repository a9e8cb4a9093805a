//! HTTP boundary error type and status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors a handler can return, each mapping to one HTTP status.
///
/// Mail failures never appear here: they are logged inside the spawned
/// send tasks and cannot reach a response.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input rejected before any write (400).
    #[error("{0}")]
    Validation(String),

    /// Unknown id (404).
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness conflict at the storage layer (409).
    #[error("{0}")]
    Conflict(String),

    /// Infrastructure failure (500); `detail` is populated only in
    /// development mode.
    #[error("{message}")]
    Internal {
        /// Stable, client-safe description of the failed operation.
        message: String,
        /// Underlying error text, redacted outside development.
        detail: Option<String>,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    /// Maps a storage failure onto the HTTP taxonomy.
    ///
    /// `context` becomes the client-visible message for plain database
    /// failures; the driver detail is exposed only when `dev_mode` is
    /// set.
    pub fn from_storage(err: frontdesk_storage::Error, context: &str, dev_mode: bool) -> Self {
        match err {
            frontdesk_storage::Error::NotFound { .. } => {
                ApiError::NotFound("Enquiry not found".to_string())
            }
            frontdesk_storage::Error::Duplicate => {
                ApiError::Conflict("Duplicate submission detected".to_string())
            }
            frontdesk_storage::Error::Core(core) => ApiError::Validation(core.to_string()),
            other => {
                error!(error = %other, context, "Storage operation failed");
                ApiError::Internal {
                    message: context.to_string(),
                    detail: dev_mode.then(|| other.to_string()),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            ApiError::Conflict(message) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            ApiError::Internal { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: message,
                    details: detail,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
