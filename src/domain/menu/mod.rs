//! Food menu domain

mod entity;
mod repository;

pub use entity::{FoodMenu, FoodMenuId, NewFoodMenu, PriceFilter};
pub use repository::FoodMenuRepository;

#[cfg(test)]
pub use repository::MockFoodMenuRepository;
