//! API Routes
//!
//! Configures the Axum router with all demo endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    calls_handler, get_handler, health_handler, insert_document_handler, list_documents_handler,
    store_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /store` - Store a value under a fresh key
/// - `GET /get/:key` - Retrieve a value, decoded per `?as=raw|str|int`
/// - `GET /calls/:operation` - Call count and history of an operation
/// - `GET /documents` - List every document
/// - `POST /documents` - Insert one document
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/store", post(store_handler))
        .route("/get/:key", get(get_handler))
        .route("/calls/:operation", get(calls_handler))
        .route(
            "/documents",
            get(list_documents_handler).post(insert_document_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
