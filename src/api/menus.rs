//! Food menu endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

use super::state::AppState;
use super::types::{
    ApiError, CreateMenuRequest, CreateMenuResponse, MenuIdsQuery, MenuListResponse,
    MenuResponse, PriceSearchQuery,
};
use crate::domain::menu::{FoodMenuId, PriceFilter};
use crate::domain::LookupArgument;

pub fn create_menus_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_menu).get(list_menus))
        .route("/search", get(search_menus))
        .route("/{id}", get(get_menu))
}

/// POST /menus
pub async fn create_menu(
    State(state): State<AppState>,
    Json(request): Json<CreateMenuRequest>,
) -> Result<(StatusCode, Json<CreateMenuResponse>), ApiError> {
    let menu = state.menu_service.create(request.into()).await?;

    Ok((StatusCode::CREATED, Json(CreateMenuResponse { id: menu.id })))
}

/// GET /menus/{id}
pub async fn get_menu(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MenuResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    let menu = state.menu_service.find_by_id(id).await?;

    Ok(Json(menu.into()))
}

/// GET /menus?ids=1,2,3
pub async fn list_menus(
    State(state): State<AppState>,
    Query(query): Query<MenuIdsQuery>,
) -> Result<Json<MenuListResponse>, ApiError> {
    let raw = query
        .ids
        .ok_or_else(|| ApiError::bad_request("Query parameter 'ids' is required").with_param("ids"))?;

    let argument = LookupArgument::<FoodMenuId>::parse(&raw)
        .map_err(|e| ApiError::from(e).with_param("ids"))?;
    debug!(?argument, "Looking up food menus");

    let menus = state.menu_service.find(argument).await?;

    Ok(Json(MenuListResponse::from_menus(menus)))
}

/// GET /menus/search?min_price=&max_price=
pub async fn search_menus(
    State(state): State<AppState>,
    Query(query): Query<PriceSearchQuery>,
) -> Result<Json<MenuListResponse>, ApiError> {
    let filter = PriceFilter::from_bounds(query.min_price, query.max_price)?;
    let menus = state.menu_service.find_by_price(filter).await?;

    Ok(Json(MenuListResponse::from_menus(menus)))
}

fn parse_id(raw: &str) -> Result<FoodMenuId, ApiError> {
    let argument = LookupArgument::<FoodMenuId>::parse(raw)
        .map_err(|e| ApiError::from(e).with_param("id"))?;

    match argument {
        LookupArgument::One(id) => Ok(id),
        LookupArgument::Many(_) => {
            Err(ApiError::bad_request(format!("'{}' is not a single menu id", raw)).with_param("id"))
        }
    }
}
