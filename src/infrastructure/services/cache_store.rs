//! Advisory cache access for cache-aside lookups
//!
//! Every operation here is best-effort: backend errors and timeouts are logged
//! and reported as misses or dropped writes, never as failures.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::domain::cache::{Cache, CacheExt, CacheKey};
use crate::domain::DomainError;

/// Upper bound for a single cache round trip
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(200);

/// Failure-tolerant wrapper around a cache backend
#[derive(Debug, Clone)]
pub struct CacheStore {
    cache: Arc<dyn Cache>,
    timeout: Duration,
}

impl CacheStore {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self {
            cache,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Sets the per-operation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads and decodes one entry
    ///
    /// `None` on miss, expiry, blank or undecodable entry, backend error or
    /// timeout.
    pub async fn get<V>(&self, key: &CacheKey) -> Option<V>
    where
        V: DeserializeOwned + Send,
    {
        match self.bounded(self.cache.get(key.as_str())).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, "Cache read failed, treating as miss: {}", e);
                None
            }
        }
    }

    /// Reads several entries in one round trip
    ///
    /// Always returns exactly one slot per key, in key order. A failed batch
    /// read yields all misses.
    pub async fn get_many(&self, keys: &[CacheKey]) -> Vec<Option<String>> {
        if keys.is_empty() {
            return Vec::new();
        }

        let raw_keys: Vec<String> = keys.iter().map(|k| k.as_str().to_string()).collect();

        match self.bounded(self.cache.get_many_raw(&raw_keys)).await {
            Ok(values) if values.len() == keys.len() => values,
            Ok(values) => {
                warn!(
                    expected = keys.len(),
                    received = values.len(),
                    "Cache multi-get returned a mismatched result, treating all as misses"
                );
                vec![None; keys.len()]
            }
            Err(e) => {
                warn!(keys = keys.len(), "Cache multi-get failed, treating all as misses: {}", e);
                vec![None; keys.len()]
            }
        }
    }

    /// Serializes and writes one entry; failures are logged and dropped
    pub async fn set<V>(&self, key: &CacheKey, value: &V, ttl: Duration)
    where
        V: Serialize + Send + Sync,
    {
        if let Err(e) = self.bounded(self.cache.set(key.as_str(), value, ttl)).await {
            warn!(key = %key, "Cache write failed: {}", e);
        }
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| {
                DomainError::cache(format!("operation timed out after {:?}", self.timeout))
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;

    fn key(raw: &str) -> CacheKey {
        CacheKey::derive(raw, &"")
    }

    #[tokio::test]
    async fn test_get_hit_and_miss() {
        let cache = Arc::new(MockCache::new().with_raw_entry("a", "1", Duration::from_secs(60)));
        let store = CacheStore::new(cache);

        assert_eq!(store.get::<i32>(&key("a")).await, Some(1));
        assert_eq!(store.get::<i32>(&key("b")).await, None);
    }

    #[tokio::test]
    async fn test_get_swallows_backend_errors() {
        let store = CacheStore::new(Arc::new(MockCache::new().with_error("connection refused")));

        assert_eq!(store.get::<i32>(&key("a")).await, None);
    }

    #[tokio::test]
    async fn test_get_treats_blank_and_corrupt_entries_as_misses() {
        let cache = Arc::new(
            MockCache::new()
                .with_raw_entry("blank", "  ", Duration::from_secs(60))
                .with_raw_entry("corrupt", "{not json", Duration::from_secs(60)),
        );
        let store = CacheStore::new(cache);

        assert_eq!(store.get::<i32>(&key("blank")).await, None);
        assert_eq!(store.get::<i32>(&key("corrupt")).await, None);
    }

    #[tokio::test]
    async fn test_get_many_failure_yields_all_misses() {
        let store = CacheStore::new(Arc::new(MockCache::new().with_error("connection refused")));

        let values = store.get_many(&[key("a"), key("b"), key("c")]).await;
        assert_eq!(values, vec![None, None, None]);
    }

    #[tokio::test]
    async fn test_get_many_empty_skips_backend() {
        let cache = Arc::new(MockCache::new());
        let store = CacheStore::new(cache.clone());

        assert!(store.get_many(&[]).await.is_empty());
        assert_eq!(cache.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_set_swallows_backend_errors() {
        let cache = Arc::new(MockCache::new().with_error("read-only replica"));
        let store = CacheStore::new(cache.clone());

        store.set(&key("a"), &42, Duration::from_secs(1)).await;

        assert_eq!(cache.set_calls(), 1);
        assert!(cache.raw("a").is_none());
    }

    #[tokio::test]
    async fn test_set_writes_json() {
        let cache = Arc::new(MockCache::new());
        let store = CacheStore::new(cache.clone());

        store
            .set(&key("menu"), &serde_json::json!({"name": "Kimchi"}), Duration::from_secs(1))
            .await;

        assert_eq!(cache.raw("menu"), Some(r#"{"name":"Kimchi"}"#.to_string()));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_as_miss() {
        let cache = Arc::new(
            MockCache::new()
                .with_raw_entry("a", "1", Duration::from_secs(60))
                .with_delay(Duration::from_secs(2)),
        );
        let store = CacheStore::new(cache).with_timeout(Duration::from_millis(20));

        let started = std::time::Instant::now();
        assert_eq!(store.get::<i32>(&key("a")).await, None);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
