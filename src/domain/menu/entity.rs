//! Food menu entity

use serde::{Deserialize, Serialize};

use crate::domain::lookup::Identifiable;
use crate::domain::DomainError;

/// Identifier assigned to a food menu by the repository
pub type FoodMenuId = i64;

/// A dish on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodMenu {
    pub id: FoodMenuId,
    pub name: String,
    pub price: i64,
}

impl FoodMenu {
    pub fn new(id: FoodMenuId, name: impl Into<String>, price: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

impl Identifiable for FoodMenu {
    type Id = FoodMenuId;

    fn id(&self) -> FoodMenuId {
        self.id
    }
}

/// Input for creating a food menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFoodMenu {
    pub name: String,
    pub price: i64,
}

impl NewFoodMenu {
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Menu name cannot be empty"));
        }

        if self.price < 0 {
            return Err(DomainError::validation(format!(
                "Menu price cannot be negative, got {}",
                self.price
            )));
        }

        Ok(())
    }
}

/// Price filter for range lookups
///
/// Serialized form is part of the cache key of the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PriceFilter {
    GreaterThan { price: i64 },
    LessThan { price: i64 },
    Between { min: i64, max: i64 },
}

impl PriceFilter {
    /// Builds a filter from optional bounds; both bounds mean an inclusive range
    pub fn from_bounds(min: Option<i64>, max: Option<i64>) -> Result<Self, DomainError> {
        match (min, max) {
            (Some(min), Some(max)) if min > max => Err(DomainError::validation(format!(
                "min_price {} is greater than max_price {}",
                min, max
            ))),
            (Some(min), Some(max)) => Ok(Self::Between { min, max }),
            (Some(price), None) => Ok(Self::GreaterThan { price }),
            (None, Some(price)) => Ok(Self::LessThan { price }),
            (None, None) => Err(DomainError::validation(
                "At least one of min_price or max_price is required",
            )),
        }
    }

    pub fn matches(&self, price: i64) -> bool {
        match *self {
            Self::GreaterThan { price: bound } => price > bound,
            Self::LessThan { price: bound } => price < bound,
            Self::Between { min, max } => price >= min && price <= max,
        }
    }
}
