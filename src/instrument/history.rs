//! Call History
//!
//! Records stringified inputs and outputs of every call in two lists,
//! `<operation>:inputs` and `<operation>:outputs`.

use std::fmt::{Debug, Display};

use async_trait::async_trait;
use serde::Serialize;
use tower::Layer;
use tracing::debug;

use crate::error::Result;
use crate::instrument::Operation;
use crate::store::{KeyValueStore, SharedStore};

/// Key of the list holding recorded inputs.
pub fn inputs_key(operation: &str) -> String {
    format!("{operation}:inputs")
}

/// Key of the list holding recorded outputs.
pub fn outputs_key(operation: &str) -> String {
    format!("{operation}:outputs")
}

/// Layer producing [`CallHistory`] decorators that record into `store`.
#[derive(Clone)]
pub struct CallHistoryLayer {
    store: SharedStore,
}

impl CallHistoryLayer {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

impl<O> Layer<O> for CallHistoryLayer {
    type Service = CallHistory<O>;

    fn layer(&self, inner: O) -> Self::Service {
        CallHistory {
            inner,
            store: self.store.clone(),
        }
    }
}

/// Appends each call's argument tuple before delegating and its result after.
///
/// A failed call leaves an input without a matching output.
pub struct CallHistory<O> {
    inner: O,
    store: SharedStore,
}

#[async_trait]
impl<In, O> Operation<In> for CallHistory<O>
where
    In: Debug + Send + 'static,
    O: Operation<In>,
    O::Out: Display,
{
    type Out = O::Out;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, input: In) -> Result<Self::Out> {
        let name = self.inner.name();
        let record = format!("{:?}", (&input,));
        self.store.rpush(&inputs_key(name), record.as_bytes()).await?;

        let output = self.inner.call(input).await?;

        self.store
            .rpush(&outputs_key(name), output.to_string().as_bytes())
            .await?;
        debug!(operation = name, "Recorded call");
        Ok(output)
    }
}

// == Call Records ==
/// Recorded inputs and outputs of one operation, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallRecords {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl CallRecords {
    /// True when every recorded input has a matching output.
    ///
    /// A failed call breaks this: its input is recorded, its output never is,
    /// and later outputs no longer line up with their inputs by index.
    pub fn is_paired(&self) -> bool {
        self.inputs.len() == self.outputs.len()
    }

    /// Pairs inputs with outputs index-for-index, or `None` when the lists
    /// have different lengths and cannot be matched up.
    pub fn pairs(&self) -> Option<impl Iterator<Item = (&str, &str)>> {
        if !self.is_paired() {
            return None;
        }
        Some(
            self.inputs
                .iter()
                .zip(self.outputs.iter())
                .map(|(i, o)| (i.as_str(), o.as_str())),
        )
    }
}

// == Read Back ==
/// Loads the full input and output history of `operation`.
pub async fn call_history(store: &dyn KeyValueStore, operation: &str) -> Result<CallRecords> {
    let decode = |items: Vec<Vec<u8>>| {
        items
            .into_iter()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .collect::<Vec<_>>()
    };

    let inputs = store.lrange(&inputs_key(operation), 0, -1).await?;
    let outputs = store.lrange(&outputs_key(operation), 0, -1).await?;

    Ok(CallRecords {
        inputs: decode(inputs),
        outputs: decode(outputs),
    })
}
