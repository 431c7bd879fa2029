//! API Module
//!
//! HTTP handlers and routing for the demo server.
//!
//! # Endpoints
//! - `POST /store` - Store a value under a fresh key
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /calls/:operation` - Call count and history
//! - `GET /documents`, `POST /documents` - List and insert documents
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
