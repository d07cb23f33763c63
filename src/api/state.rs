//! Application state for shared services

use std::sync::Arc;

use crate::domain::Cache;
use crate::infrastructure::services::MenuService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub menu_service: Arc<MenuService>,
    pub cache: Arc<dyn Cache>,
}

impl AppState {
    pub fn new(menu_service: Arc<MenuService>, cache: Arc<dyn Cache>) -> Self {
        Self {
            menu_service,
            cache,
        }
    }
}
