//! Cache trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Textual key/value store with per-entry expiry
///
/// Values are JSON strings so the trait stays dyn-compatible; typed access
/// goes through [`CacheExt`].
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// Gets a raw JSON value; expired entries read as `None`
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Gets several raw values at once
    ///
    /// The result has the same length and order as `keys`, with `None` for
    /// every missing or expired key.
    async fn get_many_raw(&self, keys: &[String]) -> Result<Vec<Option<String>>, DomainError> {
        let mut results = Vec::with_capacity(keys.len());

        for key in keys {
            results.push(self.get_raw(key).await?);
        }

        Ok(results)
    }

    /// Sets a raw JSON value, replacing any previous entry, expiring after `ttl`
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Checks if a live entry exists for the key
    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get_raw(key).await?.is_some())
    }

    /// Gets the remaining TTL for a key, `None` when absent
    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError>;
}

/// Extension trait providing typed get/set operations
pub trait CacheExt: Cache {
    /// Gets a typed value from the cache; blank entries read as absent
    fn get<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.get_raw(key).await? {
                Some(data) if !data.trim().is_empty() => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        DomainError::cache(format!("Failed to deserialize cache value: {}", e))
                    })?;
                    Ok(Some(value))
                }
                _ => Ok(None),
            }
        }
    }

    /// Sets a typed value in the cache with a TTL
    fn set<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::cache(format!("Failed to serialize cache value: {}", e))
            })?;
            self.set_raw(key, &data, ttl).await
        }
    }
}

// Blanket implementation for all types implementing Cache
impl<T: Cache + ?Sized> CacheExt for T {}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Instant;

    /// Mock cache for testing
    ///
    /// Honours TTLs and counts calls. It can be told to fail or stall every
    /// operation to simulate a backend outage, or to reject writes to single
    /// keys.
    #[derive(Debug)]
    pub struct MockCache {
        entries: Mutex<HashMap<String, (String, Instant)>>,
        error: Mutex<Option<String>>,
        failing_writes: Mutex<HashSet<String>>,
        delay: Mutex<Option<Duration>>,
        get_calls: AtomicUsize,
        get_many_calls: AtomicUsize,
        set_calls: AtomicUsize,
    }

    impl Default for MockCache {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockCache {
        pub fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                error: Mutex::new(None),
                failing_writes: Mutex::new(HashSet::new()),
                delay: Mutex::new(None),
                get_calls: AtomicUsize::new(0),
                get_many_calls: AtomicUsize::new(0),
                set_calls: AtomicUsize::new(0),
            }
        }

        pub fn with_entry<V: Serialize>(self, key: &str, value: &V, ttl: Duration) -> Self {
            let json = serde_json::to_string(value).unwrap();
            self.with_raw_entry(key, &json, ttl)
        }

        pub fn with_raw_entry(self, key: &str, raw: &str, ttl: Duration) -> Self {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (raw.to_string(), Instant::now() + ttl));
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            self.set_error(error);
            self
        }

        /// Rejects every write to `key`; other keys are unaffected
        pub fn with_failing_write(self, key: &str) -> Self {
            self.failing_writes.lock().unwrap().insert(key.to_string());
            self
        }

        pub fn with_delay(self, delay: Duration) -> Self {
            *self.delay.lock().unwrap() = Some(delay);
            self
        }

        pub fn set_error(&self, error: impl Into<String>) {
            *self.error.lock().unwrap() = Some(error.into());
        }

        pub fn raw(&self, key: &str) -> Option<String> {
            self.entries
                .lock()
                .unwrap()
                .get(key)
                .filter(|(_, expires_at)| *expires_at > Instant::now())
                .map(|(json, _)| json.clone())
        }

        pub fn get_calls(&self) -> usize {
            self.get_calls.load(Ordering::SeqCst)
        }

        pub fn get_many_calls(&self) -> usize {
            self.get_many_calls.load(Ordering::SeqCst)
        }

        pub fn set_calls(&self) -> usize {
            self.set_calls.load(Ordering::SeqCst)
        }

        pub fn total_calls(&self) -> usize {
            self.get_calls() + self.get_many_calls() + self.set_calls()
        }

        async fn check(&self) -> Result<(), DomainError> {
            let delay = *self.delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::cache(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.check().await?;
            Ok(self.raw(key))
        }

        async fn get_many_raw(&self, keys: &[String]) -> Result<Vec<Option<String>>, DomainError> {
            self.get_many_calls.fetch_add(1, Ordering::SeqCst);
            self.check().await?;
            Ok(keys.iter().map(|key| self.raw(key)).collect())
        }

        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            self.check().await?;
            if self.failing_writes.lock().unwrap().contains(key) {
                return Err(DomainError::cache(format!("write to '{}' rejected", key)));
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
            Ok(())
        }

        async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
            self.check().await?;
            let now = Instant::now();
            Ok(self
                .entries
                .lock()
                .unwrap()
                .get(key)
                .and_then(|(_, expires_at)| expires_at.checked_duration_since(now)))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_cache_set_get() {
            let cache = MockCache::new();
            cache
                .set("key1", &"value1", Duration::from_secs(60))
                .await
                .unwrap();

            let result: Option<String> = cache.get("key1").await.unwrap();
            assert_eq!(result, Some("value1".to_string()));
        }

        #[tokio::test]
        async fn test_mock_cache_entry_expires() {
            let cache = MockCache::new().with_entry("key1", &1, Duration::from_millis(20));

            tokio::time::sleep(Duration::from_millis(40)).await;

            let result: Option<i32> = cache.get("key1").await.unwrap();
            assert!(result.is_none());
        }

        #[tokio::test]
        async fn test_mock_cache_get_many_keeps_order() {
            let cache = MockCache::new()
                .with_raw_entry("a", "1", Duration::from_secs(60))
                .with_raw_entry("c", "3", Duration::from_secs(60));

            let keys = vec!["a".to_string(), "b".to_string(), "c".to_string()];
            let values = cache.get_many_raw(&keys).await.unwrap();

            assert_eq!(values, vec![Some("1".to_string()), None, Some("3".to_string())]);
            assert_eq!(cache.get_many_calls(), 1);
        }

        #[tokio::test]
        async fn test_mock_cache_failing_write_is_per_key() {
            let cache = MockCache::new().with_failing_write("b");

            assert!(cache.set_raw("a", "1", Duration::from_secs(60)).await.is_ok());
            assert!(cache.set_raw("b", "2", Duration::from_secs(60)).await.is_err());
            assert_eq!(cache.raw("a"), Some("1".to_string()));
            assert!(cache.raw("b").is_none());
        }

        #[tokio::test]
        async fn test_mock_cache_with_error() {
            let cache = MockCache::new().with_error("Test error");

            let result: Result<Option<String>, _> = cache.get("key").await;
            assert!(result.is_err());
            assert_eq!(cache.get_calls(), 1);
        }
    }
}
