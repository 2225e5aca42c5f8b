//! Room Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::{CurrentUser, access};
use crate::core::ServerState;
use crate::db::repository::{category, hotel};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::{ApiResponse, ListResponse};

/// GET /api/hotels/:hotel_id/categories
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(hotel_id): Path<String>,
) -> AppResult<Json<ListResponse<Category>>> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    let categories = category::find_by_hotel(&state.pool, &hotel_id).await?;
    Ok(Json(ListResponse::ok(categories)))
}

/// POST /api/hotels/:hotel_id/categories
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(hotel_id): Path<String>,
    Json(req): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    if hotel::find_by_id(&state.pool, &hotel_id).await?.is_none() {
        return Err(AppError::not_found(format!("Hotel {hotel_id} not found")));
    }
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;

    let created = category::create(&state.pool, &hotel_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(created, "Category created")),
    ))
}

/// PUT /api/hotels/:hotel_id/categories/:id
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((hotel_id, id)): Path<(String, String)>,
    Json(req): Json<CategoryUpdate>,
) -> AppResult<Json<ApiResponse<Category>>> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    let updated = category::update(&state.pool, &id, req).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/hotels/:hotel_id/categories/:id
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((hotel_id, id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<bool>>> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    let deleted = category::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Category {id} not found")));
    }
    Ok(Json(ApiResponse::ok_with_message(true, "Category deleted")))
}
