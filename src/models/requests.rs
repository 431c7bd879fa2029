//! Request DTOs for the demo API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::documents::{Document, ID_FIELD};
use crate::store::StoredValue;

/// Request body for POST /store
///
/// `value` may be a JSON string, integer, float, or array of bytes.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The value to store under a fresh key
    pub value: StoredValue,
}

/// How GET /get/:key should decode the stored bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// Raw bytes, returned as an array of numbers
    #[default]
    Raw,
    /// UTF-8 text
    Str,
    /// Decimal integer
    Int,
}

/// Query string for GET /get/:key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    #[serde(default, rename = "as")]
    pub format: ValueFormat,
}

/// Request body for POST /documents
#[derive(Debug, Clone, Deserialize)]
pub struct InsertDocumentRequest {
    /// Named fields of the new document
    pub fields: Document,
}

impl InsertDocumentRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.fields.contains_key(ID_FIELD) {
            return Some(format!("Field '{}' is assigned by the store", ID_FIELD));
        }
        None
    }
}
