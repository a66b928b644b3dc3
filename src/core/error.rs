//! Typed error handling for the API
//!
//! Every handler returns `Result<_, ApiError>`. The conversion to an HTTP
//! response happens in one place, the `IntoResponse` impl below, so routes
//! never render errors themselves.
//!
//! # Error Categories
//!
//! - [`ApiError::Validation`]: a required request field is absent or falsy (400)
//! - [`ApiError::NotFound`]: no row matches the requested key (404)
//! - [`ApiError::Storage`]: the database rejected or failed a query (500)
//!
//! # Example
//!
//! ```rust,ignore
//! let company = service
//!     .get(&code)
//!     .await?
//!     .ok_or_else(|| ApiError::not_found("company", &code))?;
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The error type shared by every route
#[derive(Debug)]
pub enum ApiError {
    /// Missing or falsy required field(s), or an unreadable request body
    Validation { message: String },

    /// No row matched the given key
    NotFound { resource: String, key: String },

    /// Any failure reported by the storage backend
    Storage { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation { message } => write!(f, "{}", message),
            ApiError::NotFound { resource, key } => {
                write!(f, "Can't find {} with key '{}'", resource, key)
            }
            ApiError::Storage { message } => write!(f, "Storage error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error body rendered inside the `{"error": ...}` envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Numeric HTTP status, repeated for clients that only read the body
    pub status: u16,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, key: impl ToString) -> Self {
        ApiError::NotFound {
            resource: resource.to_string(),
            key: key.to_string(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::Storage {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            status: self.status_code().as_u16(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Storage { message } => tracing::error!(%message, "storage failure"),
            other => tracing::warn!(status = status.as_u16(), "{}", other),
        }
        let body = Json(serde_json::json!({ "error": self.to_response() }));
        (status, body).into_response()
    }
}

// =============================================================================
// Conversions from external error types
// =============================================================================

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::storage(format!("{:#}", err))
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::storage(err.to_string())
    }
}
