//! In-process document collection.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::documents::{Document, DocumentCollection, DocumentId, Filter, ID_FIELD};
use crate::error::{Result, StoreError};

/// Document collection kept in insertion order in process memory.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    documents: RwLock<Vec<Document>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn count_documents(&self, filter: &Filter) -> Result<u64> {
        let documents = self.documents.read().await;
        Ok(documents.iter().filter(|d| filter.matches(d)).count() as u64)
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn insert_one(&self, mut document: Document) -> Result<DocumentId> {
        let id = match document.get(ID_FIELD) {
            Some(Value::String(raw)) => DocumentId::parse(raw).map_err(|e| {
                StoreError::Document(format!("'{ID_FIELD}' is not a valid identifier: {e}"))
            })?,
            Some(other) => {
                return Err(StoreError::Document(format!(
                    "'{ID_FIELD}' must be a string, got {other}"
                )))
            }
            None => DocumentId::new(),
        };
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let mut documents = self.documents.write().await;
        let taken = Filter::field_eq(ID_FIELD, id.to_string());
        if documents.iter().any(|d| taken.matches(d)) {
            return Err(StoreError::Document(format!("duplicate '{ID_FIELD}': {id}")));
        }

        documents.push(document);
        debug!(id = %id, total = documents.len(), "insert_one");
        Ok(id)
    }
}
