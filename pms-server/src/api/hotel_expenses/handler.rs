//! Hotel Expense API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::{CurrentUser, access};
use crate::core::ServerState;
use crate::db::repository::{hotel, hotel_expense, payment_mode};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, time};
use shared::models::{HotelExpense, HotelExpenseCreate, HotelExpenseUpdate};
use shared::{ApiResponse, ListResponse, Pagination};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

/// GET /api/hotels/:hotel_id/expenses
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(hotel_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ListResponse<HotelExpense>>> {
    access::authorize(&state.pool, &user, &hotel_id).await?;

    let page = query.page.max(1);
    let limit = query.limit.max(1);
    let offset = (page - 1) * limit;

    let total = hotel_expense::count_by_hotel(&state.pool, &hotel_id).await?;
    let expenses = hotel_expense::find_by_hotel(&state.pool, &hotel_id, limit, offset).await?;

    Ok(Json(ListResponse::paginated(
        expenses,
        Pagination::new(page, limit, total),
    )))
}

/// POST /api/hotels/:hotel_id/expenses
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(hotel_id): Path<String>,
    Json(req): Json<HotelExpenseCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<HotelExpense>>)> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    if hotel::find_by_id(&state.pool, &hotel_id).await?.is_none() {
        return Err(AppError::not_found(format!("Hotel {hotel_id} not found")));
    }
    validate_required_text(&req.title, "title", MAX_NAME_LEN)?;
    if let Some(mode_id) = &req.payment_mode_id
        && payment_mode::find_by_id(&state.pool, mode_id).await?.is_none()
    {
        return Err(AppError::not_found(format!(
            "Payment mode {mode_id} not found"
        )));
    }

    let expense_date = match &req.expense_date {
        Some(d) => {
            time::parse_date(d)?;
            d.clone()
        }
        None => time::today(state.config.timezone)
            .format("%Y-%m-%d")
            .to_string(),
    };

    let created =
        hotel_expense::create(&state.pool, &hotel_id, &user.id, &expense_date, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(created, "Expense recorded")),
    ))
}

/// PUT /api/hotels/:hotel_id/expenses/:id
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((hotel_id, id)): Path<(String, String)>,
    Json(req): Json<HotelExpenseUpdate>,
) -> AppResult<Json<ApiResponse<HotelExpense>>> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    if let Some(date) = &req.expense_date {
        time::parse_date(date)?;
    }
    let updated = hotel_expense::update(&state.pool, &id, req).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/hotels/:hotel_id/expenses/:id
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((hotel_id, id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<bool>>> {
    access::authorize(&state.pool, &user, &hotel_id).await?;
    let deleted = hotel_expense::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Hotel expense {id} not found")));
    }
    Ok(Json(ApiResponse::ok_with_message(true, "Expense deleted")))
}
