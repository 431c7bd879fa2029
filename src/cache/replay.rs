//! Replay Module
//!
//! Human-readable rendering of an operation's recorded calls.

use std::fmt;

use serde::Serialize;

use crate::instrument::CallRecords;

// == Replay ==
/// Call count plus recorded history of one operation.
#[derive(Debug, Clone, Serialize)]
pub struct Replay {
    pub operation: String,
    pub count: u64,
    #[serde(flatten)]
    pub records: CallRecords,
}

impl Replay {
    pub fn new(operation: impl Into<String>, count: u64, records: CallRecords) -> Self {
        Self {
            operation: operation.into(),
            count,
            records,
        }
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.count == 1 { "" } else { "s" };
        write!(f, "{} was called {} time{}:", self.operation, self.count, plural)?;
        if let Some(pairs) = self.records.pairs() {
            for (input, output) in pairs {
                write!(f, "\n{}{} -> {}", self.operation, input, output)?;
            }
            return Ok(());
        }

        write!(
            f,
            "\n(history cannot be paired: {} inputs, {} outputs)",
            self.records.inputs.len(),
            self.records.outputs.len()
        )?;
        for input in &self.records.inputs {
            write!(f, "\n{}{}", self.operation, input)?;
        }
        for output in &self.records.outputs {
            write!(f, "\n-> {output}")?;
        }
        Ok(())
    }
}
