//! Food menu repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{FoodMenu, FoodMenuId, NewFoodMenu, PriceFilter};
use crate::domain::error::DomainError;

/// Repository for food menu persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FoodMenuRepository: Send + Sync {
    /// Stores a new menu and returns it with its assigned identifier
    async fn create(&self, menu: NewFoodMenu) -> Result<FoodMenu, DomainError>;

    /// Finds a menu by identifier
    async fn find_by_id(&self, id: FoodMenuId) -> Result<Option<FoodMenu>, DomainError>;

    /// Finds all menus whose identifier is in `ids`; unknown identifiers are skipped
    async fn find_by_ids(&self, ids: &[FoodMenuId]) -> Result<Vec<FoodMenu>, DomainError>;

    /// Finds all menus matching a price filter, ordered by identifier
    async fn find_by_price(&self, filter: PriceFilter) -> Result<Vec<FoodMenu>, DomainError>;
}
