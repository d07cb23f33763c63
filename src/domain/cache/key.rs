//! Cache key derivation

use std::fmt;

use serde::Serialize;

use crate::domain::DomainError;

/// A fully derived cache key: a lookup prefix followed by an identifier suffix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for an entity identifier: `prefix + identifier`
    pub fn derive(prefix: &str, identifier: &impl fmt::Display) -> Self {
        Self(format!("{}{}", prefix, identifier))
    }

    /// Derives the key for a filter-style lookup from its serialized parameters
    pub fn for_query<P: Serialize + ?Sized>(prefix: &str, params: &P) -> Result<Self, DomainError> {
        let suffix = serde_json::to_string(params).map_err(|e| {
            DomainError::cache(format!("Failed to serialize query parameters: {}", e))
        })?;

        Ok(Self(format!("{}{}", prefix, suffix)))
    }

    /// Returns the string representation of the key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derives one key per identifier, preserving order
pub fn derive_keys<'a, I, T>(prefix: &str, identifiers: I) -> Vec<CacheKey>
where
    I: IntoIterator<Item = &'a T>,
    T: fmt::Display + 'a,
{
    identifiers
        .into_iter()
        .map(|id| CacheKey::derive(prefix, id))
        .collect()
}
