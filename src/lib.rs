//! Menu Cache-Aside
//!
//! A read-through cache in front of a food menu repository:
//! - Single and batch lookups that only load the identifiers missing from the cache
//! - Per-lookup key prefix and TTL
//! - In-memory (moka) or Redis cache backends
//! - Cache failures degrade to direct loads instead of failing requests

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::menu::NewFoodMenu;
use domain::Cache;
use infrastructure::cache::{CacheFactory, CacheType};
use infrastructure::menu::InMemoryFoodMenuRepository;
use infrastructure::services::{CacheStore, MenuService};
use tracing::{info, warn};

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache = create_cache(config).await?;
    let store = CacheStore::new(cache.clone()).with_timeout(config.cache.operation_timeout());

    let repository = InMemoryFoodMenuRepository::seeded(default_menus()).await?;
    info!("Food menu repository seeded");

    let menu_service = MenuService::new(
        Arc::new(repository),
        store,
        config.menu.to_menu_cache_config(),
    );

    Ok(AppState::new(Arc::new(menu_service), cache))
}

/// Build the configured cache backend
///
/// An unreachable Redis falls back to the in-memory backend: lookups never
/// depend on the cache being available. Misconfiguration is still an error.
pub async fn create_cache(config: &AppConfig) -> anyhow::Result<Arc<dyn Cache>> {
    let cache_config = config.cache.to_cache_config()?;
    let factory = CacheFactory::new();

    info!("Cache backend: {}", cache_config.cache_type);

    match factory.create(&cache_config).await {
        Ok(cache) => Ok(cache),
        Err(e) if cache_config.cache_type == CacheType::Redis && e.is_cache() => {
            warn!("Redis unavailable ({}), falling back to in-memory cache", e);
            Ok(factory.create_in_memory())
        }
        Err(e) => Err(e.into()),
    }
}

/// Menus available on startup
pub fn default_menus() -> Vec<NewFoodMenu> {
    vec![
        NewFoodMenu::new("Margherita", 900),
        NewFoodMenu::new("Quattro Formaggi", 1150),
        NewFoodMenu::new("Carbonara", 1200),
        NewFoodMenu::new("Caesar Salad", 800),
        NewFoodMenu::new("Tiramisu", 650),
    ]
}
