//! Food menu request and response types

use serde::{Deserialize, Serialize};

use crate::domain::menu::{FoodMenu, FoodMenuId, NewFoodMenu};

/// Body of `POST /menus`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuRequest {
    pub name: String,
    pub price: i64,
}

impl From<CreateMenuRequest> for NewFoodMenu {
    fn from(request: CreateMenuRequest) -> Self {
        NewFoodMenu::new(request.name, request.price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenuResponse {
    pub id: FoodMenuId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuResponse {
    pub id: FoodMenuId,
    pub name: String,
    pub price: i64,
}

impl From<FoodMenu> for MenuResponse {
    fn from(menu: FoodMenu) -> Self {
        Self {
            id: menu.id,
            name: menu.name,
            price: menu.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuListResponse {
    pub menus: Vec<MenuResponse>,
}

impl MenuListResponse {
    pub fn from_menus(menus: Vec<FoodMenu>) -> Self {
        Self {
            menus: menus.into_iter().map(MenuResponse::from).collect(),
        }
    }
}

/// Query of `GET /menus?ids=1,2,3`
#[derive(Debug, Clone, Deserialize)]
pub struct MenuIdsQuery {
    pub ids: Option<String>,
}

/// Query of `GET /menus/search`
#[derive(Debug, Clone, Deserialize)]
pub struct PriceSearchQuery {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}
