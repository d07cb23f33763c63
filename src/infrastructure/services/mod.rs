//! Application services

mod cache_aside_service;
mod cache_store;
mod menu_service;

pub use cache_aside_service::{CacheAside, QueryCache};
pub use cache_store::{CacheStore, DEFAULT_OPERATION_TIMEOUT};
pub use menu_service::{MenuCacheConfig, MenuService};
