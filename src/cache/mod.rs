//! Cache Module
//!
//! Keyed cache over a key-value store, with instrumented writes.

mod keyed;
mod replay;


// Re-export public types
pub use keyed::{decode_str, parse_int, Cache, Instrumentation, STORE_OPERATION};
pub use replay::Replay;
