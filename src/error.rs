//! Error types for the store wrappers
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the cache and document helpers.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The Redis backend rejected a command or the connection failed
    #[error("Backend error: {0}")]
    Backend(#[from] redis::RedisError),

    /// Operation against a key holding the wrong kind of value
    #[error("Wrong type for key: {0}")]
    WrongType(String),

    /// Stored data could not be converted to the requested type
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// The document collection rejected a query or write
    #[error("Document store error: {0}")]
    Document(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Nothing stored under the requested key
    #[error("Key not found: {0}")]
    NotFound(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            StoreError::Conversion(_) | StoreError::WrongType(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            StoreError::Backend(_) | StoreError::Document(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the store wrappers.
pub type Result<T> = std::result::Result<T, StoreError>;
