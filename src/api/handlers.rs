//! API Handlers
//!
//! HTTP request handlers exposing the keyed cache and a document collection.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::{decode_str, parse_int, Cache, Replay};
use crate::documents::{self, DocumentCollection, MemoryCollection};
use crate::error::{Result, StoreError};
use crate::models::{
    DocumentsResponse, GetQuery, GetResponse, HealthResponse, InsertDocumentRequest,
    InsertDocumentResponse, StoreRequest, StoreResponse, ValueFormat,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Keyed cache over the configured key-value store
    pub cache: Arc<Cache>,
    /// Document collection backing /documents
    pub documents: Arc<dyn DocumentCollection>,
}

impl AppState {
    /// Creates a new AppState with the given cache and collection.
    pub fn new(cache: Cache, documents: Arc<dyn DocumentCollection>) -> Self {
        Self {
            cache: Arc::new(cache),
            documents,
        }
    }

    /// Creates an AppState with an in-process document collection.
    pub fn with_memory_documents(cache: Cache) -> Self {
        Self::new(cache, Arc::new(MemoryCollection::new()))
    }
}

/// Handler for POST /store
///
/// Stores a value under a fresh key and returns the key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    let key = state.cache.store(req.value).await?;
    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /get/:key?as=raw|str|int
///
/// Absent keys map to 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<GetQuery>,
) -> Result<Json<GetResponse>> {
    let value: Option<Value> = match query.format {
        ValueFormat::Raw => state.cache.get(&key).await?.map(Value::from),
        ValueFormat::Str => state
            .cache
            .get_with(&key, |raw| decode_str(raw).map(Value::from))
            .await?,
        ValueFormat::Int => state
            .cache
            .get_with(&key, |raw| parse_int(raw).map(Value::from))
            .await?,
    };

    match value {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(StoreError::NotFound(key)),
    }
}

/// Handler for GET /calls/:operation
///
/// Returns the call count and recorded history of an operation.
pub async fn calls_handler(
    State(state): State<AppState>,
    Path(operation): Path<String>,
) -> Result<Json<Replay>> {
    let replay = state.cache.replay(&operation).await?;
    Ok(Json(replay))
}

/// Handler for GET /documents
pub async fn list_documents_handler(
    State(state): State<AppState>,
) -> Result<Json<DocumentsResponse>> {
    let docs = documents::list_all(state.documents.as_ref()).await?;
    Ok(Json(DocumentsResponse::new(docs)))
}

/// Handler for POST /documents
pub async fn insert_document_handler(
    State(state): State<AppState>,
    Json(req): Json<InsertDocumentRequest>,
) -> Result<Json<InsertDocumentResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let id = documents::insert_document(state.documents.as_ref(), req.fields).await?;
    Ok(Json(InsertDocumentResponse { id }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
