//! Cache domain - key derivation and the backend abstraction

mod key;
mod repository;

pub use key::{derive_keys, CacheKey};
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
