//! Tests against a live Redis server.
//!
//! Ignored by default; run with `REDIS_URL` pointing at a disposable database
//! (it gets flushed) and `cargo test -- --ignored`.

use std::env;
use std::sync::Arc;

use backstore::config::DEFAULT_REDIS_URL;
use backstore::store::{KeyValueStore, RedisStore};
use backstore::{Cache, StoreConfig, STORE_OPERATION};

fn redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string())
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_cache_roundtrip_on_redis() {
    let cache = Cache::connect(&StoreConfig::Redis { url: redis_url() })
        .await
        .unwrap();

    let key = cache.store("foo").await.unwrap();
    assert_eq!(cache.get(&key).await.unwrap(), Some(b"foo".to_vec()));

    let key = cache.store(42).await.unwrap();
    assert_eq!(cache.get_int(&key).await.unwrap(), Some(42));

    assert_eq!(cache.get("never-written").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_instrumentation_persists_in_redis() {
    let store = Arc::new(RedisStore::connect(&redis_url()).await.unwrap());
    let cache = Cache::new(store.clone()).await.unwrap();

    let first = cache.store("first").await.unwrap();
    let second = cache.store(b"second".to_vec()).await.unwrap();

    let raw_count = store.get(STORE_OPERATION).await.unwrap();
    assert_eq!(raw_count, Some(b"2".to_vec()));

    let replay = cache.replay(STORE_OPERATION).await.unwrap();
    assert_eq!(replay.count, 2);
    assert_eq!(replay.records.outputs, vec![first, second]);
    assert_eq!(replay.records.inputs.len(), 2);
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_new_cache_flushes_previous_state() {
    let store = Arc::new(RedisStore::connect(&redis_url()).await.unwrap());
    store.set("leftover", b"x").await.unwrap();

    let cache = Cache::new(store).await.unwrap();

    assert_eq!(cache.get("leftover").await.unwrap(), None);
    assert_eq!(cache.call_count(STORE_OPERATION).await.unwrap(), 0);
}
