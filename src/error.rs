//! Error types for the hawaii-climate application.
//!
//! Every fallible operation in the crate returns [`ClimateError`]. Handlers
//! hand it straight back to axum, which renders it through the
//! [`IntoResponse`] implementation below.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// The main error type for hawaii-climate operations.
#[derive(Error, Debug)]
pub enum ClimateError {
    /// The SQLite store is missing, unreadable, or lacks the expected tables
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// A query against the store failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A date stored in the measurement table could not be parsed
    #[error("Invalid stored date: {value}")]
    InvalidStoredDate { value: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl ClimateError {
    /// HTTP status used when this error escapes a handler
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::StorageUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ClimateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for Results with ClimateError
pub type Result<T> = std::result::Result<T, ClimateError>;
