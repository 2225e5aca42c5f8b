//! Payment Mode API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::payment_mode;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{PaymentMode, PaymentModeCreate, PaymentModeUpdate};
use shared::{ApiResponse, ListResponse};

/// GET /api/payment-modes — payment modes created by the caller
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ListResponse<PaymentMode>>> {
    let modes = payment_mode::find_by_creator(&state.pool, &user.id).await?;
    Ok(Json(ListResponse::ok(modes)))
}

/// POST /api/payment-modes
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<PaymentModeCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<PaymentMode>>)> {
    validate_required_text(&req.payment_mode, "payment_mode", MAX_NAME_LEN)?;
    let created = payment_mode::create(&state.pool, &user.id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(created, "Payment mode created")),
    ))
}

/// PUT /api/payment-modes/:id
pub async fn update(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<PaymentModeUpdate>,
) -> AppResult<Json<ApiResponse<PaymentMode>>> {
    validate_required_text(&req.payment_mode, "payment_mode", MAX_NAME_LEN)?;
    let updated = payment_mode::update(&state.pool, &id, req).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/payment-modes/:id
pub async fn delete(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let deleted = payment_mode::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Payment mode {id} not found")));
    }
    Ok(Json(ApiResponse::ok_with_message(true, "Payment mode deleted")))
}
