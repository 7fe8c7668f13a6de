//! Tests for the TTL cache

use super::*;
use crate::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_get_or_compute_computes_on_miss() {
    let cache: TtlCache<String, Vec<String>> = TtlCache::new(Duration::from_secs(60));

    let value = cache
        .get_or_compute("graphite".to_string(), || async {
            Ok(vec!["cpu.load".to_string()])
        })
        .await
        .unwrap();

    assert_eq!(value, vec!["cpu.load"]);
}

#[tokio::test]
async fn test_get_or_compute_hits_within_ttl() {
    let cache: TtlCache<String, Vec<String>> = TtlCache::new(Duration::from_secs(60));
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let calls = Arc::clone(&calls);
        let value = cache
            .get_or_compute("graphite".to_string(), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["cpu.load".to_string()])
            })
            .await
            .unwrap();
        assert_eq!(value, vec!["cpu.load"]);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_or_compute_recomputes_after_expiry() {
    let cache: TtlCache<String, usize> = TtlCache::new(Duration::from_millis(10));
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..2 {
        let calls = Arc::clone(&calls);
        cache
            .get_or_compute("key".to_string(), move || async move {
                Ok(calls.fetch_add(1, Ordering::SeqCst))
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_keys_are_independent() {
    let cache: TtlCache<String, &'static str> = TtlCache::new(Duration::from_secs(60));

    cache
        .get_or_compute("a".to_string(), || async { Ok("alpha") })
        .await
        .unwrap();
    cache
        .get_or_compute("b".to_string(), || async { Ok("beta") })
        .await
        .unwrap();

    assert_eq!(cache.get(&"a".to_string()).await, Some("alpha"));
    assert_eq!(cache.get(&"b".to_string()).await, Some("beta"));
}

#[tokio::test]
async fn test_failed_compute_stores_nothing() {
    let cache: TtlCache<String, usize> = TtlCache::new(Duration::from_secs(60));

    let result = cache
        .get_or_compute("key".to_string(), || async {
            Err(Error::http_status(502, "bad gateway"))
        })
        .await;
    assert!(result.is_err());

    assert_eq!(cache.get(&"key".to_string()).await, None);

    // The next call computes again rather than serving a poisoned entry
    let value = cache
        .get_or_compute("key".to_string(), || async { Ok(7) })
        .await
        .unwrap();
    assert_eq!(value, 7);
}

#[tokio::test]
async fn test_insert_and_get() {
    let cache: TtlCache<String, String> = TtlCache::new(Duration::from_secs(60));

    assert_eq!(cache.get(&"k".to_string()).await, None);
    cache.insert("k".to_string(), "v".to_string()).await;
    assert_eq!(cache.get(&"k".to_string()).await, Some("v".to_string()));

    cache.clear().await;
    assert_eq!(cache.get(&"k".to_string()).await, None);
}

#[tokio::test]
async fn test_get_ignores_expired_entries() {
    let cache: TtlCache<String, usize> = TtlCache::new(Duration::from_millis(5));

    cache.insert("k".to_string(), 1).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(cache.get(&"k".to_string()).await, None);
}
