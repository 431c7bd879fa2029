//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use backstore::{api::create_router, store::MemoryStore, AppState, Cache, STORE_OPERATION};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

// == Helper Functions ==

async fn create_test_app() -> Router {
    let cache = Cache::new(Arc::new(MemoryStore::new())).await.unwrap();
    create_router(AppState::with_memory_documents(cache))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn store_value(app: &Router, body: &str) -> String {
    let response = app.clone().oneshot(post_json("/store", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    json["key"].as_str().unwrap().to_string()
}

// == STORE / GET Endpoint Tests ==

#[tokio::test]
async fn test_store_returns_key() {
    let app = create_test_app().await;
    let key = store_value(&app, r#"{"value":"test_value"}"#).await;
    assert_eq!(key.len(), 36);
}

#[tokio::test]
async fn test_store_then_get_str() {
    let app = create_test_app().await;
    let key = store_value(&app, r#"{"value":"hello"}"#).await;

    let response = app
        .oneshot(get_request(&format!("/get/{key}?as=str")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"].as_str().unwrap(), key);
    assert_eq!(json["value"].as_str().unwrap(), "hello");
}

#[tokio::test]
async fn test_store_then_get_int() {
    let app = create_test_app().await;
    let key = store_value(&app, r#"{"value":"42"}"#).await;

    let response = app
        .oneshot(get_request(&format!("/get/{key}?as=int")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"].as_i64().unwrap(), 42);
}

#[tokio::test]
async fn test_get_raw_returns_bytes() {
    let app = create_test_app().await;
    let key = store_value(&app, r#"{"value":[1,2,255]}"#).await;

    let response = app
        .oneshot(get_request(&format!("/get/{key}")))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"], serde_json::json!([1, 2, 255]));
}

#[tokio::test]
async fn test_get_int_on_text_is_unprocessable() {
    let app = create_test_app().await;
    let key = store_value(&app, r#"{"value":"not a number"}"#).await;

    let response = app
        .oneshot(get_request(&format!("/get/{key}?as=int")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app().await;

    let response = app
        .oneshot(get_request("/get/nonexistent_key"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == CALLS Endpoint Tests ==

#[tokio::test]
async fn test_calls_endpoint_tracks_stores() {
    let app = create_test_app().await;
    let first = store_value(&app, r#"{"value":"a"}"#).await;
    let second = store_value(&app, r#"{"value":7}"#).await;

    let response = app
        .oneshot(get_request(&format!("/calls/{STORE_OPERATION}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["operation"].as_str().unwrap(), STORE_OPERATION);
    assert_eq!(json["count"].as_u64().unwrap(), 2);
    assert_eq!(json["inputs"].as_array().unwrap().len(), 2);
    assert_eq!(json["outputs"][0].as_str().unwrap(), first);
    assert_eq!(json["outputs"][1].as_str().unwrap(), second);
}

#[tokio::test]
async fn test_calls_endpoint_unknown_operation() {
    let app = create_test_app().await;

    let response = app.oneshot(get_request("/calls/unknown")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"].as_u64().unwrap(), 0);
    assert!(json["inputs"].as_array().unwrap().is_empty());
}

// == DOCUMENTS Endpoint Tests ==

#[tokio::test]
async fn test_documents_empty_then_inserted() {
    let app = create_test_app().await;

    let response = app.clone().oneshot(get_request("/documents")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"].as_u64().unwrap(), 0);

    let response = app
        .clone()
        .oneshot(post_json(
            "/documents",
            r#"{"fields":{"name":"Holberton school","address":"972 Mission street"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let inserted = body_to_json(response.into_body()).await;
    let id = inserted["id"].as_str().unwrap().to_string();

    let response = app.oneshot(get_request("/documents")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"].as_u64().unwrap(), 1);
    let doc = &json["documents"][0];
    assert_eq!(doc["_id"].as_str().unwrap(), id);
    assert_eq!(doc["name"].as_str().unwrap(), "Holberton school");
    assert_eq!(doc["address"].as_str().unwrap(), "972 Mission street");
}

#[tokio::test]
async fn test_insert_document_with_id_rejected() {
    let app = create_test_app().await;

    let response = app
        .oneshot(post_json("/documents", r#"{"fields":{"_id":"mine"}}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app().await;

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
}
