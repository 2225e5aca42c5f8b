//! Food Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::{CurrentUser, access};
use crate::core::ServerState;
use crate::db::repository::{food_order, guest_stay, menu};
use crate::ledger::food::price_lines;
use crate::utils::{AppError, AppResult, time};
use shared::ApiResponse;
use shared::models::{FoodOrderRequest, FoodOrderView};

#[derive(Debug, Deserialize)]
pub struct FoodOrderQuery {
    /// Calendar date (YYYY-MM-DD), defaults to the current business date
    pub date: Option<String>,
}

/// Fetch the stay behind a booking id and authorize the caller
async fn authorize_booking(
    state: &ServerState,
    user: &CurrentUser,
    booking_id: &str,
) -> AppResult<()> {
    let stay = guest_stay::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Guest stay {booking_id} not found")))?;
    access::authorize(&state.pool, user, &stay.hotel_id).await
}

/// POST /api/stays/:id/food-orders — add an itemized food expense
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<FoodOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<FoodOrderView>>)> {
    authorize_booking(&state, &user, &id).await?;

    let menu_ids: Vec<String> = req.lines.iter().map(|l| l.menu_id.clone()).collect();
    let menus = menu::find_by_ids(&state.pool, &menu_ids).await?;
    let (priced, grand_total) = price_lines(&menus, &req.lines).map_err(AppError::from)?;

    let date = time::today(state.config.timezone)
        .format("%Y-%m-%d")
        .to_string();
    let view = food_order::add_food_expense(&state.pool, &id, &priced, grand_total, &date).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(view, "Food order recorded")),
    ))
}

/// GET /api/stays/:id/food-orders?date= — the day's food orders
pub async fn list_for_date(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<FoodOrderQuery>,
) -> AppResult<Json<ApiResponse<FoodOrderView>>> {
    authorize_booking(&state, &user, &id).await?;

    let tz = state.config.timezone;
    let date = match &query.date {
        Some(d) => time::parse_date(d)?,
        None => time::today(tz),
    };
    let start = time::day_start_millis(date, tz);
    let end = time::day_end_millis(date, tz);

    let view = food_order::find_for_date(
        &state.pool,
        &id,
        &date.format("%Y-%m-%d").to_string(),
        start,
        end,
    )
    .await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/food-expenses/:expense_id — replace the line set.
///
/// Prior lines are deleted and the new set inserted in one transaction;
/// the parent expense amount becomes the new grand total.
pub async fn replace(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(expense_id): Path<String>,
    Json(req): Json<FoodOrderRequest>,
) -> AppResult<Json<ApiResponse<FoodOrderView>>> {
    let expense = food_order::find_expense(&state.pool, &expense_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Expense {expense_id} not found")))?;
    authorize_booking(&state, &user, &expense.booking_id).await?;

    let menu_ids: Vec<String> = req.lines.iter().map(|l| l.menu_id.clone()).collect();
    let menus = menu::find_by_ids(&state.pool, &menu_ids).await?;
    let (priced, grand_total) = price_lines(&menus, &req.lines).map_err(AppError::from)?;

    let view = food_order::replace_food_expense(
        &state.pool,
        state.config.timezone,
        &expense_id,
        &priced,
        grand_total,
    )
    .await?;
    Ok(Json(ApiResponse::ok_with_message(view, "Food order replaced")))
}
