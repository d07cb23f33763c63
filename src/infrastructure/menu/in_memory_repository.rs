//! In-memory food menu repository implementation

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::error::DomainError;
use crate::domain::menu::{FoodMenu, FoodMenuId, FoodMenuRepository, NewFoodMenu, PriceFilter};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<FoodMenuId, FoodMenu>,
    last_id: FoodMenuId,
}

/// In-memory implementation of FoodMenuRepository
///
/// Identifiers are assigned sequentially starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFoodMenuRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryFoodMenuRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with the given menus
    pub async fn seeded(menus: impl IntoIterator<Item = NewFoodMenu>) -> Result<Self, DomainError> {
        let repository = Self::new();
        for menu in menus {
            repository.create(menu).await?;
        }
        Ok(repository)
    }
}

#[async_trait]
impl FoodMenuRepository for InMemoryFoodMenuRepository {
    async fn create(&self, menu: NewFoodMenu) -> Result<FoodMenu, DomainError> {
        let mut table = self.table.write().await;

        table.last_id += 1;
        let created = FoodMenu::new(table.last_id, menu.name, menu.price);
        table.rows.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: FoodMenuId) -> Result<Option<FoodMenu>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[FoodMenuId]) -> Result<Vec<FoodMenu>, DomainError> {
        let table = self.table.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    async fn find_by_price(&self, filter: PriceFilter) -> Result<Vec<FoodMenu>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|menu| filter.matches(menu.price))
            .cloned()
            .collect())
    }
}
