//! Documents Module
//!
//! The document collection contract and the two helpers built on it:
//! listing every document and inserting one document from named fields.

mod filter;
mod memory;

use std::fmt::{self, Display};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;

pub use filter::Filter;
pub use memory::MemoryCollection;

/// A schemaless record: field name to JSON value.
pub type Document = Map<String, Value>;

/// Field under which a stored document carries its identifier.
pub const ID_FIELD: &str = "_id";

// == Document Id ==
/// Identifier of a stored document, assigned on insert unless the caller
/// supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    /// Creates a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier from its string form.
    pub fn parse(s: &str) -> std::result::Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// == Document Collection ==
/// Handle to an external document collection.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Number of documents matching `filter`.
    async fn count_documents(&self, filter: &Filter) -> Result<u64>;

    /// Documents matching `filter`, in the collection's natural order.
    async fn find(&self, filter: &Filter) -> Result<Vec<Document>>;

    /// Persists `document` and returns its identifier.
    ///
    /// A string `_id` already in the document is kept as the identifier; it
    /// must parse as one and must not be taken. Otherwise one is assigned.
    async fn insert_one(&self, document: Document) -> Result<DocumentId>;
}

// == List All ==
/// Returns every document in `collection`, or an empty list when it has none.
pub async fn list_all(collection: &dyn DocumentCollection) -> Result<Vec<Document>> {
    let filter = Filter::all();
    if collection.count_documents(&filter).await? == 0 {
        return Ok(Vec::new());
    }
    collection.find(&filter).await
}

// == Insert Document ==
/// Inserts one document built from all of `fields` and returns its identifier.
pub async fn insert_document<I, K>(collection: &dyn DocumentCollection, fields: I) -> Result<DocumentId>
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    let document: Document = fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
    let field_count = document.len();

    let id = collection.insert_one(document).await?;
    debug!(id = %id, fields = field_count, "Inserted document");
    Ok(id)
}
