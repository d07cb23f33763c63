//! Per-lookup cache configuration

use std::time::Duration;

/// Default TTL applied to cached lookups
pub const DEFAULT_LOOKUP_TTL: Duration = Duration::from_millis(500);

/// Configuration of one registered cache-aside lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Prepended to every identifier to form the cache key; empty disables caching
    pub prefix: String,
    /// Lifetime of each entry written by this lookup
    pub ttl: Duration,
}

impl LookupConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ttl: DEFAULT_LOOKUP_TTL,
        }
    }

    /// Sets the entry TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// A lookup without a prefix goes straight to the data loader
    pub fn is_enabled(&self) -> bool {
        !self.prefix.is_empty()
    }
}
