//! HTTP request and response types

pub mod error;
pub mod menu;

pub use error::{ApiError, ApiErrorResponse};
pub use menu::{
    CreateMenuRequest, CreateMenuResponse, MenuIdsQuery, MenuListResponse, MenuResponse,
    PriceSearchQuery,
};
