//! Key-Value Store Module
//!
//! The key-value store contract the cache is written against, plus an
//! in-process backend and a Redis backend.

mod entry;
mod memory;
mod redis_store;
mod value;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::StoreConfig;
use crate::error::Result;

// Re-export public types
pub use entry::Entry;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use value::StoredValue;

/// Raw bytes as returned by the store.
pub type RawValue = Vec<u8>;

// == Key-Value Store ==
/// Handle to an external key-value store.
///
/// Mirrors the subset of Redis commands the cache and its instrumentation use.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Removes every key in the current database.
    async fn flushdb(&self) -> Result<()>;

    /// Writes `value` under `key`, replacing whatever was there.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Reads the string value under `key`; `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<RawValue>>;

    /// Atomically increments the integer under `key`, starting from 0.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends `value` to the list under `key`; returns the new length.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<u64>;

    /// Returns list elements between `start` and `stop` inclusive.
    ///
    /// Negative indexes count from the end, as in Redis.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<RawValue>>;
}

/// Shared, type-erased store handle.
pub type SharedStore = Arc<dyn KeyValueStore>;

// == Connect ==
/// Opens the backend described by `config`.
pub async fn connect(config: &StoreConfig) -> Result<SharedStore> {
    match config {
        StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreConfig::Redis { url } => Ok(Arc::new(RedisStore::connect(url).await?)),
    }
}
