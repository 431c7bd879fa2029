//! Keyed Cache Module
//!
//! Stores values under freshly generated keys and reads them back with
//! optional conversion. Writes go through a decorator stack that counts calls
//! and records call history, by default in the same store as the data.

use async_trait::async_trait;
use tower::{Layer, ServiceBuilder};
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::Replay;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::instrument::{
    self, BoxOperation, CallHistoryLayer, CallRecords, CountCallsLayer, Operation,
};
use crate::store::{self, RawValue, SharedStore, StoredValue};

/// Name under which `Cache::store` calls are counted and recorded.
pub const STORE_OPERATION: &str = "Cache::store";

// == Instrumentation ==
/// Which decorators wrap the cache's write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrumentation {
    pub count_calls: bool,
    pub call_history: bool,
}

impl Instrumentation {
    /// No decorators at all.
    pub const fn none() -> Self {
        Self {
            count_calls: false,
            call_history: false,
        }
    }
}

impl Default for Instrumentation {
    fn default() -> Self {
        Self {
            count_calls: true,
            call_history: true,
        }
    }
}

/// Innermost write: generate a key, SET the value, return the key.
struct WriteValue {
    store: SharedStore,
}

#[async_trait]
impl Operation<StoredValue> for WriteValue {
    type Out = String;

    fn name(&self) -> &str {
        STORE_OPERATION
    }

    async fn call(&self, value: StoredValue) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &value.to_bytes()).await?;
        debug!(key = %key, "Stored value");
        Ok(key)
    }
}

fn build_writer(
    store: &SharedStore,
    tracker: &SharedStore,
    instrumentation: Instrumentation,
) -> BoxOperation<StoredValue, String> {
    let base = WriteValue {
        store: store.clone(),
    };
    let count = CountCallsLayer::new(tracker.clone());
    let history = CallHistoryLayer::new(tracker.clone());

    match (instrumentation.count_calls, instrumentation.call_history) {
        (true, true) => Box::new(ServiceBuilder::new().layer(count).layer(history).service(base)),
        (true, false) => Box::new(count.layer(base)),
        (false, true) => Box::new(history.layer(base)),
        (false, false) => Box::new(base),
    }
}

// == Cache ==
/// Cache over a key-value store handle.
///
/// Construction flushes the target store; after that the cache only adds keys.
/// Call counts and history go to `tracker`, which is the data store itself
/// unless built with [`Cache::with_tracker`].
pub struct Cache {
    store: SharedStore,
    tracker: SharedStore,
    writer: BoxOperation<StoredValue, String>,
}

impl Cache {
    // == Constructors ==
    /// Flushes `store` and wraps it with both call counting and call history.
    pub async fn new(store: SharedStore) -> Result<Self> {
        Self::with_instrumentation(store, Instrumentation::default()).await
    }

    /// Flushes `store` and wraps it with the chosen decorators.
    pub async fn with_instrumentation(
        store: SharedStore,
        instrumentation: Instrumentation,
    ) -> Result<Self> {
        let tracker = store.clone();
        Self::with_tracker(store, tracker, instrumentation).await
    }

    /// Flushes `store` and records call counts and history into `tracker`.
    ///
    /// `tracker` is not flushed, so counts kept there outlive the cache.
    pub async fn with_tracker(
        store: SharedStore,
        tracker: SharedStore,
        instrumentation: Instrumentation,
    ) -> Result<Self> {
        store.flushdb().await?;
        info!(?instrumentation, "Cache ready, store flushed");

        let writer = build_writer(&store, &tracker, instrumentation);
        Ok(Self {
            store,
            tracker,
            writer,
        })
    }

    /// Opens the backend described by `config` and builds a cache on it.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let store = store::connect(config).await?;
        Self::new(store).await
    }

    // == Store ==
    /// Writes `value` under a new random key and returns the key.
    pub async fn store(&self, value: impl Into<StoredValue> + Send) -> Result<String> {
        self.writer.call(value.into()).await
    }

    // == Get ==
    /// Reads the raw bytes under `key`; `None` when nothing is stored.
    pub async fn get(&self, key: &str) -> Result<Option<RawValue>> {
        self.store.get(key).await
    }

    /// Reads `key` and converts the bytes with `convert` when present.
    ///
    /// `convert` is never called for an absent key.
    pub async fn get_with<T, F>(&self, key: &str, convert: F) -> Result<Option<T>>
    where
        F: FnOnce(RawValue) -> Result<T>,
    {
        match self.store.get(key).await? {
            Some(raw) => convert(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Reads `key` as UTF-8 text.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, decode_str).await
    }

    /// Reads `key` as a decimal integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, parse_int).await
    }

    // == Instrumentation Read Back ==
    /// How many times `operation` has been called since the store was flushed.
    pub async fn call_count(&self, operation: &str) -> Result<u64> {
        instrument::call_count(self.tracker.as_ref(), operation).await
    }

    /// Recorded inputs and outputs of `operation`.
    pub async fn call_history(&self, operation: &str) -> Result<CallRecords> {
        instrument::call_history(self.tracker.as_ref(), operation).await
    }

    /// Count and history of `operation`, ready to display.
    pub async fn replay(&self, operation: &str) -> Result<Replay> {
        let count = self.call_count(operation).await?;
        let records = self.call_history(operation).await?;
        Ok(Replay::new(operation, count, records))
    }
}

// == Converters ==
/// Decodes raw bytes as UTF-8 text.
pub fn decode_str(raw: RawValue) -> Result<String> {
    String::from_utf8(raw).map_err(|e| StoreError::Conversion(format!("invalid UTF-8: {e}")))
}

/// Parses raw bytes as a signed decimal integer.
pub fn parse_int(raw: RawValue) -> Result<i64> {
    let text = decode_str(raw)?;
    text.trim()
        .parse::<i64>()
        .map_err(|e| StoreError::Conversion(format!("'{text}' is not an integer: {e}")))
}
