//! TTL cache with get-or-compute semantics
//!
//! Backs expensive discovery calls. Callers only see the logical
//! get-or-compute operation; entries and their expiry are owned here.

use crate::error::Result;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Cached entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Generic TTL cache
///
/// Concurrent misses on the same key compute once; the write lock is held
/// across the compute, so misses on different keys briefly serialize too.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Create a cache whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// The configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a live entry, if present
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    /// Insert or replace an entry, restarting its TTL
    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(key, CacheEntry::new(value, self.ttl));
    }

    /// Drop all entries
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    /// Return the cached value for `key`, computing and storing it on a
    /// miss or after expiry. A failed compute stores nothing.
    pub async fn get_or_compute<F, Fut>(&self, key: K, compute: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                if !entry.is_expired() {
                    return Ok(entry.value.clone());
                }
            }
        }

        // Acquire write lock and re-check: another task may have computed
        // the value while we waited.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(&key) {
            if !entry.is_expired() {
                return Ok(entry.value.clone());
            }
        }

        let value = compute().await?;
        entries.insert(key, CacheEntry::new(value.clone(), self.ttl));

        Ok(value)
    }
}

#[cfg(test)]
mod tests;
