//! Redis Store Module
//!
//! Key-value store backed by a Redis server over an async connection manager.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::error::Result;
use crate::store::{KeyValueStore, RawValue};

// == Redis Store ==
/// Key-value store that forwards every call to Redis.
///
/// The connection manager reconnects on its own and is cheap to clone, so each
/// command runs on a clone of it.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    // == Connect ==
    /// Opens a managed connection to the Redis server at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        info!(url, "Connected to Redis");
        Ok(Self { conn })
    }

    fn conn(&self) -> ConnectionManager {
        self.conn.clone()
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn flushdb(&self) -> Result<()> {
        let mut conn = self.conn();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        debug!("FLUSHDB");
        Ok(())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn();
        let _: () = conn.set(key, value).await?;
        debug!(key, "SET");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<RawValue>> {
        let mut conn = self.conn();
        let value: Option<RawValue> = conn.get(key).await?;

        match &value {
            Some(_) => debug!(key, "GET hit"),
            None => debug!(key, "GET miss"),
        }

        Ok(value)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn();
        let value: i64 = conn.incr(key, 1i64).await?;
        debug!(key, value, "INCR");
        Ok(value)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<u64> {
        let mut conn = self.conn();
        let len: u64 = conn.rpush(key, value).await?;
        debug!(key, len, "RPUSH");
        Ok(len)
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<RawValue>> {
        let mut conn = self.conn();
        let items: Vec<RawValue> = conn.lrange(key, start, stop).await?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = RedisStore::connect("not a url").await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }
}
