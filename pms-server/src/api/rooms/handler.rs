//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::{CurrentUser, access};
use crate::core::ServerState;
use crate::db::repository::{hotel, room};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Room, RoomCreate, RoomUpdate};
use shared::{ApiResponse, ListResponse};

/// GET /api/hotels/:hotel_id/rooms
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(hotel_id): Path<String>,
) -> AppResult<Json<ListResponse<Room>>> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    let rooms = room::find_by_hotel(&state.pool, &hotel_id).await?;
    Ok(Json(ListResponse::ok(rooms)))
}

/// POST /api/hotels/:hotel_id/rooms
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(hotel_id): Path<String>,
    Json(req): Json<RoomCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Room>>)> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    if hotel::find_by_id(&state.pool, &hotel_id).await?.is_none() {
        return Err(AppError::not_found(format!("Hotel {hotel_id} not found")));
    }
    validate_required_text(&req.room_no, "room_no", MAX_SHORT_TEXT_LEN)?;

    let created = room::create(&state.pool, &hotel_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(created, "Room created")),
    ))
}

/// PUT /api/hotels/:hotel_id/rooms/:id
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((hotel_id, id)): Path<(String, String)>,
    Json(req): Json<RoomUpdate>,
) -> AppResult<Json<ApiResponse<Room>>> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    let updated = room::update(&state.pool, &id, req).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/hotels/:hotel_id/rooms/:id
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((hotel_id, id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<bool>>> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    let deleted = room::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Room {id} not found")));
    }
    Ok(Json(ApiResponse::ok_with_message(true, "Room deleted")))
}
