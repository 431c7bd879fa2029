//! Call Counter
//!
//! Increments a per-operation counter before every call.

use async_trait::async_trait;
use tower::Layer;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::instrument::Operation;
use crate::store::{KeyValueStore, SharedStore};

/// Layer producing [`CountCalls`] decorators that count into `store`.
#[derive(Clone)]
pub struct CountCallsLayer {
    store: SharedStore,
}

impl CountCallsLayer {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl<O> Layer<O> for CountCallsLayer {
    type Service = CountCalls<O>;

    fn layer(&self, inner: O) -> Self::Service {
        CountCalls {
            inner,
            store: self.store.clone(),
        }
    }
}

/// Counts invocations of the wrapped operation under its name.
pub struct CountCalls<O> {
    inner: O,
    store: SharedStore,
}

#[async_trait]
impl<In, O> Operation<In> for CountCalls<O>
where
    In: Send + 'static,
    O: Operation<In>,
{
    type Out = O::Out;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, input: In) -> Result<Self::Out> {
        let count = self.store.incr(self.inner.name()).await?;
        debug!(operation = self.inner.name(), count, "Counted call");
        self.inner.call(input).await
    }
}

// == Read Back ==
/// Returns how many times `operation` has been called; 0 if never.
pub async fn call_count(store: &dyn KeyValueStore, operation: &str) -> Result<u64> {
    let Some(raw) = store.get(operation).await? else {
        return Ok(0);
    };
    std::str::from_utf8(&raw)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or_else(|| StoreError::Conversion(format!("counter '{operation}' is not an integer")))
}
