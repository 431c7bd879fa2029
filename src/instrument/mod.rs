//! Call Instrumentation Module
//!
//! Decorators that wrap an [`Operation`] with bookkeeping kept in a key-value
//! store. Each decorator is produced by a [`tower::Layer`], so stacks are built
//! by explicit chaining:
//!
//! ```ignore
//! let op = ServiceBuilder::new()
//!     .layer(CountCallsLayer::new(store.clone()))
//!     .layer(CallHistoryLayer::new(store.clone()))
//!     .service(inner);
//! ```

mod counter;
mod history;

use async_trait::async_trait;

use crate::error::Result;

pub use counter::{call_count, CountCalls, CountCallsLayer};
pub use history::{call_history, inputs_key, outputs_key, CallHistory, CallHistoryLayer, CallRecords};

// == Operation ==
/// A named async operation `In -> Out` that decorators can wrap.
#[async_trait]
pub trait Operation<In: Send + 'static>: Send + Sync {
    /// Output produced on success.
    type Out: Send;

    /// Identifier used to key counters and history lists.
    fn name(&self) -> &str;

    /// Runs the operation.
    async fn call(&self, input: In) -> Result<Self::Out>;
}

#[async_trait]
impl<In, O> Operation<In> for Box<O>
where
    In: Send + 'static,
    O: Operation<In> + ?Sized,
{
    type Out = O::Out;

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn call(&self, input: In) -> Result<Self::Out> {
        (**self).call(input).await
    }
}

/// Type-erased operation, used once a decorator stack is assembled.
pub type BoxOperation<In, Out> = Box<dyn Operation<In, Out = Out>>;
