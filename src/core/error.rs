//! Error type system for Warden
//!
//! This module provides the service-wide error type with:
//! - HTTP status code mapping
//! - JSON error responses with trace IDs
//! - Integration with axum's response machinery

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Main error type for the Warden service
#[derive(Debug, thiserror::Error)]
pub enum WardenError {
    // System-level errors
    #[error("System initialization failed: {0}")]
    InitializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    // API-related errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // I/O errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // Background task errors
    #[error("Task error: {0}")]
    TaskError(String),
}

impl WardenError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request (includes duplicate-key rejections)
            WardenError::InvalidRequest(_) | WardenError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }

            // 401 Unauthorized
            WardenError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            WardenError::PermissionDenied(_) => StatusCode::FORBIDDEN,

            // 404 Not Found
            WardenError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            WardenError::InitializationError(_)
            | WardenError::ConfigError(_)
            | WardenError::DatabaseError(_)
            | WardenError::IoError(_)
            | WardenError::TaskError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type name for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            WardenError::InitializationError(_) => "InitializationError",
            WardenError::ConfigError(_) => "ConfigError",
            WardenError::DatabaseError(_) => "DatabaseError",
            WardenError::InvalidRequest(_) => "InvalidRequest",
            WardenError::AuthenticationError(_) => "AuthenticationError",
            WardenError::NotFound(_) => "NotFound",
            WardenError::PermissionDenied(_) => "PermissionDenied",
            WardenError::ValidationError(_) => "ValidationError",
            WardenError::IoError(_) => "IoError",
            WardenError::TaskError(_) => "TaskError",
        }
    }
}

/// Error response structure for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique trace ID for this error
    pub trace_id: String,
}

impl ErrorResponse {
    /// Create a new error response with a generated trace ID
    pub fn new(error: String, message: String) -> Self {
        Self {
            error,
            message,
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an error response from a WardenError
    pub fn from_error(error: &WardenError) -> Self {
        Self::new(error.error_type().to_string(), error.to_string())
    }
}

/// Implement IntoResponse for WardenError to enable automatic error handling in Axum
impl IntoResponse for WardenError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_response = ErrorResponse::from_error(&self);

        tracing::error!(
            error_type = self.error_type(),
            trace_id = %error_response.trace_id,
            status_code = %status_code,
            "Request failed: {}",
            self
        );

        (status_code, Json(error_response)).into_response()
    }
}

/// Result type alias for operations that can fail with WardenError
pub type Result<T> = std::result::Result<T, WardenError>;

/// Context extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let context_str = context.into();
            WardenError::InitializationError(format!("{}: {}", context_str, e))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let context_str = f();
            WardenError::InitializationError(format!("{}: {}", context_str, e))
        })
    }
}
