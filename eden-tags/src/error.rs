//! Error types for eden-tags
//!
//! Every failure is reported to the caller as `{"error": ..., "code": ...}`.
//! `error` keeps the plain message existing clients read; `code` tells the
//! failure classes apart.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;
use crate::validator::ValidationError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not parseable JSON (400)
    #[error("invalid json: {0}")]
    MalformedRequest(String),

    /// Parsed payload broke a field constraint (400)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Known path, unsupported method (405)
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Tag id already taken (409)
    #[error("{0}")]
    Conflict(String),

    /// Storage backend failure (500)
    #[error("{0}")]
    Storage(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => ApiError::Conflict(err.to_string()),
            StoreError::Storage(_) => ApiError::Storage(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match self {
            ApiError::MalformedRequest(_) => (StatusCode::BAD_REQUEST, "MALFORMED_REQUEST"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::MethodNotAllowed(_) => {
                (StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED")
            }
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "code": error_code,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
