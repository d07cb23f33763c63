//! Cache-aside lookups
//!
//! [`CacheAside`] decorates a [`DataLoader`] with a read-through cache:
//! cached records are served directly, only the missing identifiers reach the
//! loader, and whatever the loader returns is written back with the lookup's
//! TTL. Cache problems only ever cost latency; loader errors always surface.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::domain::cache::{derive_keys, CacheKey};
use crate::domain::lookup::{DataLoader, Identifiable, LookupConfig};
use crate::domain::DomainError;

use super::cache_store::CacheStore;

/// A data loader wrapped with a read-through cache
pub struct CacheAside<L> {
    store: CacheStore,
    config: LookupConfig,
    loader: L,
}

impl<L: DataLoader> CacheAside<L> {
    pub fn new(store: CacheStore, config: LookupConfig, loader: L) -> Self {
        Self {
            store,
            config,
            loader,
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Looks up a single record
    ///
    /// Fails with `NotFound` when the loader has no such record; loader
    /// errors are returned unchanged.
    pub async fn lookup_one(&self, id: &L::Id) -> Result<L::Record, DomainError> {
        if !self.config.is_enabled() {
            return self.load_one(id).await;
        }

        let key = CacheKey::derive(&self.config.prefix, id);
        read_through(&self.store, &key, self.config.ttl, || self.load_one(id)).await
    }

    async fn load_one(&self, id: &L::Id) -> Result<L::Record, DomainError> {
        self.loader
            .load_one(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("No record for identifier '{}'", id)))
    }
}

impl<L> CacheAside<L>
where
    L: DataLoader,
    L::Record: Identifiable<Id = L::Id>,
{
    /// Looks up a batch of records
    ///
    /// Results follow the first-seen order of `ids`, duplicates collapsed.
    /// Identifiers the loader cannot resolve are left out.
    pub async fn lookup_many(&self, ids: &[L::Id]) -> Result<Vec<L::Record>, DomainError> {
        if ids.is_empty() {
            return Err(DomainError::invalid_argument("identifier list is empty"));
        }

        let requested = first_seen(ids);
        let caching = self.config.is_enabled();

        let (mut found, misses) = if caching {
            self.read_cached(&requested).await
        } else {
            (HashMap::new(), requested.clone())
        };

        let mut unrequested = Vec::new();

        if !misses.is_empty() {
            let fetched = self.loader.load_many(&misses).await?;
            if caching {
                self.write_back(&fetched).await;
            }

            let requested_set: HashSet<&L::Id> = requested.iter().collect();
            for record in fetched {
                let id = record.id();
                if !requested_set.contains(&id) {
                    unrequested.push(id.clone());
                }
                found.insert(id, record);
            }
        }

        Ok(requested
            .iter()
            .chain(unrequested.iter())
            .filter_map(|id| found.remove(id))
            .collect())
    }

    /// Splits `ids` into decoded cache hits and misses with one batch read
    async fn read_cached(&self, ids: &[L::Id]) -> (HashMap<L::Id, L::Record>, Vec<L::Id>) {
        let keys = derive_keys(&self.config.prefix, ids);
        let cached = self.store.get_many(&keys).await;

        let mut found = HashMap::with_capacity(ids.len());
        let mut misses = Vec::new();

        for ((id, key), raw) in ids.iter().zip(&keys).zip(cached) {
            match raw.as_deref().and_then(|raw| decode::<L::Record>(key, raw)) {
                Some(record) => {
                    found.insert(id.clone(), record);
                }
                None => misses.push(id.clone()),
            }
        }

        debug!(
            prefix = %self.config.prefix,
            hits = found.len(),
            misses = misses.len(),
            "Batch cache lookup"
        );

        (found, misses)
    }

    /// Caches each fetched record under its own key; writes fail independently
    async fn write_back(&self, records: &[L::Record]) {
        let writes = records.iter().map(|record| {
            let key = CacheKey::derive(&self.config.prefix, &record.id());
            async move { self.store.set(&key, record, self.config.ttl).await }
        });

        join_all(writes).await;
    }
}

/// Read-through cache for filter-style lookups
///
/// The whole result of a query is cached as one entry keyed by the query's
/// serialized parameters.
#[derive(Debug, Clone)]
pub struct QueryCache {
    store: CacheStore,
    config: LookupConfig,
}

impl QueryCache {
    pub fn new(store: CacheStore, config: LookupConfig) -> Self {
        Self { store, config }
    }

    pub async fn lookup<P, V, F, Fut>(&self, params: &P, load: F) -> Result<V, DomainError>
    where
        P: Serialize + ?Sized,
        V: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, DomainError>>,
    {
        if !self.config.is_enabled() {
            return load().await;
        }

        let key = match CacheKey::for_query(&self.config.prefix, params) {
            Ok(key) => key,
            Err(e) => {
                warn!("Skipping cache for query: {}", e);
                return load().await;
            }
        };

        read_through(&self.store, &key, self.config.ttl, load).await
    }
}

/// Serves `key` from cache, or runs `load` and caches its result
async fn read_through<V, F, Fut>(
    store: &CacheStore,
    key: &CacheKey,
    ttl: Duration,
    load: F,
) -> Result<V, DomainError>
where
    V: Serialize + DeserializeOwned + Send + Sync,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, DomainError>>,
{
    if let Some(value) = store.get::<V>(key).await {
        debug!(key = %key, "Cache hit");
        return Ok(value);
    }

    debug!(key = %key, "Cache miss");

    let value = load().await?;
    store.set(key, &value, ttl).await;
    Ok(value)
}

/// Decodes a cached entry; corrupt entries are logged and read as misses
fn decode<V: DeserializeOwned>(key: &CacheKey, raw: &str) -> Option<V> {
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, "Discarding undecodable cache entry: {}", e);
            None
        }
    }
}

fn first_seen<T: Clone + Eq + std::hash::Hash>(ids: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}
