//! Configuration Module
//!
//! Loads store connection parameters and server settings from environment variables.

use std::env;

/// Default Redis connection URL (local instance, database 0).
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";

/// Which key-value backend a cache connects to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreConfig {
    /// In-process store, lost on exit
    #[default]
    Memory,
    /// Redis server reachable at the given URL
    Redis { url: String },
}

impl StoreConfig {
    /// Builds a store config from a backend name and a Redis URL.
    ///
    /// Unknown backend names fall back to the in-memory store.
    pub fn from_parts(backend: &str, redis_url: impl Into<String>) -> Self {
        match backend.to_ascii_lowercase().as_str() {
            "redis" => StoreConfig::Redis {
                url: redis_url.into(),
            },
            _ => StoreConfig::Memory,
        }
    }
}

/// Demo server configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key-value backend used by the cache
    pub store: StoreConfig,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379/)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let backend = env::var("STORE_BACKEND").unwrap_or_else(|_| "memory".to_string());
        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());

        Self {
            store: StoreConfig::from_parts(&backend, redis_url),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            server_port: 3000,
        }
    }
}
