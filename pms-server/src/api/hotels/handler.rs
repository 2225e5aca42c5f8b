//! Hotel API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::{CurrentUser, access};
use crate::core::ServerState;
use crate::db::repository::{assignment, hotel, rollup};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, time};
use shared::models::{
    AssignManagerRequest, DayReport, Hotel, HotelAssignment, HotelCreate, HotelUpdate, UserRole,
};
use shared::{ApiResponse, ListResponse};

/// GET /api/hotels — hotels in the caller's scope
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ListResponse<Hotel>>> {
    let hotels = match user.role {
        UserRole::Admin => hotel::find_for_admin(&state.pool, &user.id).await?,
        UserRole::Manager => hotel::find_for_manager(&state.pool, &user.id).await?,
    };
    Ok(Json(ListResponse::ok(hotels)))
}

/// POST /api/hotels — create a hotel (admin only)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<HotelCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Hotel>>)> {
    if !user.is_admin() {
        return Err(AppError::access_denied("only admins can create hotels"));
    }
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    if req.total_rooms < 0 {
        return Err(AppError::validation("total_rooms must not be negative"));
    }

    let created = hotel::create(&state.pool, &user.id, req).await?;
    tracing::info!(hotel = %created.name, "Hotel created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(created, "Hotel created")),
    ))
}

/// GET /api/hotels/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Hotel>>> {
    access::authorize(&state.pool, &user, &id).await?;
    let found = hotel::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hotel {id} not found")))?;
    Ok(Json(ApiResponse::ok(found)))
}

/// PUT /api/hotels/:id — admin only
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<HotelUpdate>,
) -> AppResult<Json<ApiResponse<Hotel>>> {
    if !user.is_admin() {
        return Err(AppError::access_denied("only admins can update hotels"));
    }
    validate_optional_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let updated = hotel::update(&state.pool, &id, req).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/hotels/:id — admin only; fails while guest stays exist
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if !user.is_admin() {
        return Err(AppError::access_denied("only admins can delete hotels"));
    }
    let deleted = hotel::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Hotel {id} not found")));
    }
    tracing::info!(hotel_id = %id, "Hotel deleted");
    Ok(Json(ApiResponse::ok_with_message(true, "Hotel deleted")))
}

/// GET /api/hotels/:id/managers — admin only
pub async fn list_managers(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ListResponse<HotelAssignment>>> {
    if !user.is_admin() {
        return Err(AppError::access_denied("only admins can list assignments"));
    }
    let assignments = assignment::find_by_hotel(&state.pool, &id).await?;
    Ok(Json(ListResponse::ok(assignments)))
}

/// POST /api/hotels/:id/managers — assign or reactivate a manager
pub async fn assign_manager(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<AssignManagerRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<HotelAssignment>>)> {
    if !user.is_admin() {
        return Err(AppError::access_denied("only admins can assign managers"));
    }
    if hotel::find_by_id(&state.pool, &id).await?.is_none() {
        return Err(AppError::not_found(format!("Hotel {id} not found")));
    }

    let assigned = assignment::assign(&state.pool, &id, &req.manager_id).await?;
    tracing::info!(hotel_id = %id, manager_id = %req.manager_id, "Manager assigned");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(assigned, "Manager assigned")),
    ))
}

/// DELETE /api/hotels/:id/managers/:manager_id — revoke access
pub async fn revoke_manager(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, manager_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<bool>>> {
    if !user.is_admin() {
        return Err(AppError::access_denied("only admins can revoke managers"));
    }
    let revoked = assignment::revoke(&state.pool, &id, &manager_id).await?;
    tracing::info!(hotel_id = %id, manager_id = %manager_id, "Manager access revoked");
    Ok(Json(ApiResponse::ok_with_message(revoked, "Manager access revoked")))
}

#[derive(Debug, Deserialize)]
pub struct DayReportQuery {
    /// Report date (YYYY-MM-DD), defaults to the current business date
    pub date: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// GET /api/hotels/:id/day-report — the hotel-day rollup
pub async fn day_report(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<DayReportQuery>,
) -> AppResult<Json<ApiResponse<DayReport>>> {
    access::authorize(&state.pool, &user, &id).await?;
    if hotel::find_by_id(&state.pool, &id).await?.is_none() {
        return Err(AppError::not_found(format!("Hotel {id} not found")));
    }

    let tz = state.config.timezone;
    let date = match &query.date {
        Some(d) => time::parse_date(d)?,
        None => time::today(tz),
    };

    let report =
        rollup::day_report(&state.pool, tz, &id, date, query.page, query.limit).await?;
    Ok(Json(ApiResponse::ok(report)))
}
