//! Backstore - keyed cache and document helpers over external stores
//!
//! A cache that writes values under random keys into a key-value store and
//! counts and records its writes, plus helpers that list and insert documents
//! in a document collection.

pub mod api;
pub mod cache;
pub mod config;
pub mod documents;
pub mod error;
pub mod instrument;
pub mod models;
pub mod store;

pub use api::AppState;
pub use cache::{Cache, STORE_OPERATION};
pub use config::{Config, StoreConfig};
pub use error::{Result, StoreError};
