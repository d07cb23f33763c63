//! Data loader boundary for cached lookups

use std::fmt::{Debug, Display};
use std::hash::Hash;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Identifier of a record in the authoritative source
pub trait Identifier: Clone + Eq + Hash + Display + Debug + Send + Sync + 'static {}

impl<T> Identifier for T where T: Clone + Eq + Hash + Display + Debug + Send + Sync + 'static {}

/// Records that can report their own identifier
///
/// Required for batch lookups, where every fetched record is cached under the
/// key derived from its identifier.
pub trait Identifiable {
    type Id: Identifier;

    fn id(&self) -> Self::Id;
}

/// The authoritative source behind a cached lookup
///
/// `Record` fixes the element type the cached JSON is decoded into.
#[async_trait]
pub trait DataLoader: Send + Sync {
    type Id: Identifier;
    type Record: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Loads one record, `None` when the source has no such record
    async fn load_one(&self, id: &Self::Id) -> Result<Option<Self::Record>, DomainError>;

    /// Loads several records; identifiers the source cannot resolve are omitted
    async fn load_many(&self, ids: &[Self::Id]) -> Result<Vec<Self::Record>, DomainError>;
}
