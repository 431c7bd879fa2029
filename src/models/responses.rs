//! Response DTOs for the demo API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::documents::{Document, DocumentId};

/// Response body for POST /store
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// The freshly generated key
    pub key: String,
}

impl StoreResponse {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Response body for GET /get/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value, decoded as requested
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for GET /documents
#[derive(Debug, Clone, Serialize)]
pub struct DocumentsResponse {
    pub count: usize,
    pub documents: Vec<Document>,
}

impl DocumentsResponse {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            count: documents.len(),
            documents,
        }
    }
}

/// Response body for POST /documents
#[derive(Debug, Clone, Serialize)]
pub struct InsertDocumentResponse {
    /// Identifier assigned by the collection
    pub id: DocumentId,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
