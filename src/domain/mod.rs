//! Domain layer - Core types and the seams the cache-aside layer plugs into

pub mod cache;
pub mod error;
pub mod lookup;
pub mod menu;

pub use cache::{Cache, CacheExt, CacheKey};
pub use error::DomainError;
pub use lookup::{DataLoader, Identifiable, Identifier, LookupArgument, LookupConfig};
pub use menu::{FoodMenu, FoodMenuId, FoodMenuRepository, NewFoodMenu, PriceFilter};
