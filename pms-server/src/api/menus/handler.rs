//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::menu;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Menu, MenuCreate, MenuUpdate};
use shared::{ApiResponse, ListResponse};

/// GET /api/menus — menus created by the caller
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ListResponse<Menu>>> {
    let menus = menu::find_by_creator(&state.pool, &user.id).await?;
    Ok(Json(ListResponse::ok(menus)))
}

/// POST /api/menus
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<MenuCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Menu>>)> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    let created = menu::create(&state.pool, &user.id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(created, "Menu created")),
    ))
}

/// PUT /api/menus/:id
pub async fn update(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<MenuUpdate>,
) -> AppResult<Json<ApiResponse<Menu>>> {
    let updated = menu::update(&state.pool, &id, req).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/menus/:id
pub async fn delete(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = menu::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Menu {id} not found")));
    }
    Ok(Json(ApiResponse::ok_with_message(true, "Menu deleted")))
}
