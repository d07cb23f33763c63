//! Food menu service
//!
//! Reads go through the cache-aside layer; writes go straight to the
//! repository and leave cached entries to expire on their own.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::domain::lookup::{DataLoader, LookupArgument, LookupConfig};
use crate::domain::menu::{FoodMenu, FoodMenuId, FoodMenuRepository, NewFoodMenu, PriceFilter};
use crate::domain::DomainError;

use super::cache_aside_service::{CacheAside, QueryCache};
use super::cache_store::CacheStore;

/// Adapts the menu repository to the data loader boundary
struct MenuLoader {
    repository: Arc<dyn FoodMenuRepository>,
}

#[async_trait]
impl DataLoader for MenuLoader {
    type Id = FoodMenuId;
    type Record = FoodMenu;

    async fn load_one(&self, id: &FoodMenuId) -> Result<Option<FoodMenu>, DomainError> {
        self.repository.find_by_id(*id).await
    }

    async fn load_many(&self, ids: &[FoodMenuId]) -> Result<Vec<FoodMenu>, DomainError> {
        self.repository.find_by_ids(ids).await
    }
}

/// Cache settings of the menu lookups
#[derive(Debug, Clone)]
pub struct MenuCacheConfig {
    /// Lookups by identifier
    pub by_id: LookupConfig,
    /// Price-filtered listings
    pub by_price: LookupConfig,
}

impl Default for MenuCacheConfig {
    fn default() -> Self {
        Self {
            by_id: LookupConfig::new("foodMenu:"),
            by_price: LookupConfig::new("foodMenu:price:"),
        }
    }
}

/// Service for food menu operations
pub struct MenuService {
    repository: Arc<dyn FoodMenuRepository>,
    menus: CacheAside<MenuLoader>,
    price_listings: QueryCache,
}

impl MenuService {
    pub fn new(
        repository: Arc<dyn FoodMenuRepository>,
        store: CacheStore,
        config: MenuCacheConfig,
    ) -> Self {
        let loader = MenuLoader {
            repository: repository.clone(),
        };

        Self {
            repository,
            menus: CacheAside::new(store.clone(), config.by_id, loader),
            price_listings: QueryCache::new(store, config.by_price),
        }
    }

    /// Creates a menu; the cache is neither evicted nor warmed
    #[instrument(skip(self))]
    pub async fn create(&self, menu: NewFoodMenu) -> Result<FoodMenu, DomainError> {
        menu.validate()?;

        let created = self.repository.create(menu).await?;
        info!(menu_id = created.id, "Created food menu");

        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: FoodMenuId) -> Result<FoodMenu, DomainError> {
        self.menus.lookup_one(&id).await.map_err(|e| match e {
            DomainError::NotFound { .. } => {
                DomainError::not_found(format!("Food menu '{}' not found", id))
            }
            other => other,
        })
    }

    #[instrument(skip(self))]
    pub async fn find_by_ids(&self, ids: &[FoodMenuId]) -> Result<Vec<FoodMenu>, DomainError> {
        self.menus.lookup_many(ids).await
    }

    /// Dispatches a parsed lookup argument to the single or batch lookup
    pub async fn find(
        &self,
        argument: LookupArgument<FoodMenuId>,
    ) -> Result<Vec<FoodMenu>, DomainError> {
        match argument {
            LookupArgument::One(id) => Ok(vec![self.find_by_id(id).await?]),
            LookupArgument::Many(ids) => self.find_by_ids(&ids).await,
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_price(&self, filter: PriceFilter) -> Result<Vec<FoodMenu>, DomainError> {
        self.price_listings
            .lookup(&filter, || self.repository.find_by_price(filter))
            .await
    }
}
