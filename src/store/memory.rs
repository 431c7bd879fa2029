//! Memory Store Module
//!
//! In-process key-value store with Redis-like command semantics.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::{Entry, KeyValueStore, RawValue};

// == Memory Store ==
/// Key-value store held in process memory.
///
/// Strings and lists share one keyspace; using a key with the wrong command
/// fails the way Redis reports WRONGTYPE.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the current number of keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if no key is set.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Resolves Redis-style inclusive range bounds against a list of `len` items.
fn resolve_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if len == 0 || start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn flushdb(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        debug!(removed, "Flushed memory store");
        Ok(())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), Entry::Bytes(value.to_vec()));
        debug!(key, "SET");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<RawValue>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) => Ok(Some(entry.as_bytes(key)?.to_vec())),
            None => Ok(None),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;
        let current = match entries.get(key) {
            Some(entry) => entry.as_integer(key)?,
            None => 0,
        };
        let next = current.checked_add(1).ok_or_else(|| {
            StoreError::Conversion(format!("increment would overflow at '{key}'"))
        })?;
        entries.insert(key.to_string(), Entry::Bytes(next.to_string().into_bytes()));
        debug!(key, value = next, "INCR");
        Ok(next)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<u64> {
        let mut entries = self.entries.write().await;
        let list = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()))
            .as_list_mut(key)?;
        list.push(value.to_vec());
        debug!(key, len = list.len(), "RPUSH");
        Ok(list.len() as u64)
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<RawValue>> {
        let entries = self.entries.read().await;
        let Some(entry) = entries.get(key) else {
            return Ok(Vec::new());
        };
        let list = entry.as_list(key)?;
        Ok(match resolve_range(list.len(), start, stop) {
            Some((from, to)) => list[from..=to].to_vec(),
            None => Vec::new(),
        })
    }
}
