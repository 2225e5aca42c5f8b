//! Guest Stay API Handlers
//!
//! Check-in, checkout, ledger recording and pending-balance reads. All
//! balance figures flow through the single ledger implementation in
//! `db::repository::ledger`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, access};
use crate::core::ServerState;
use crate::db::repository::{guest_stay, hotel, ledger, payment_mode};
use crate::ledger::money::{money_string, to_decimal, to_f64};
use crate::ledger::pending::accrued_bill;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, time};
use shared::models::{
    CheckoutRequest, GuestExpense, GuestStay, GuestStayCreate, GuestStayUpdate,
    GuestTransaction, LedgerEntryRequest, StayLedger,
};
use shared::{ApiResponse, ListResponse, Pagination};

#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    /// Balance date (YYYY-MM-DD), defaults to the current business date
    pub date: Option<String>,
}

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
    10
}

/// Response for a merged ledger write
#[derive(Debug, Serialize)]
pub struct LedgerEntryResponse {
    pub transaction: Option<GuestTransaction>,
    pub expense: Option<GuestExpense>,
    pub pending_amount: String,
}

/// Resolve the as-of date for a stay: explicit query date wins, otherwise
/// the current business date, floored at check-in for stays dated ahead.
fn resolve_as_of(
    state: &ServerState,
    stay: &GuestStay,
    query_date: Option<&str>,
) -> AppResult<NaiveDate> {
    let checkin = time::parse_date(&stay.checkin_date)?;
    match query_date {
        Some(d) => time::parse_date(d),
        None => Ok(time::today(state.config.timezone).max(checkin)),
    }
}

/// Build the ledger snapshot view for a stay
async fn stay_ledger(
    state: &ServerState,
    stay: GuestStay,
    as_of: NaiveDate,
) -> AppResult<StayLedger> {
    let breakdown =
        ledger::pending_for_stay(&state.pool, state.config.timezone, &stay, as_of).await?;
    Ok(StayLedger {
        stay,
        as_of_date: as_of.format("%Y-%m-%d").to_string(),
        total_bill: money_string(breakdown.accrued),
        food_expenses: money_string(breakdown.food),
        payments_received: money_string(breakdown.payments),
        pending_amount: money_string(breakdown.pending),
    })
}

/// Fetch a stay and authorize the caller against its hotel
async fn load_authorized(
    state: &ServerState,
    user: &CurrentUser,
    id: &str,
) -> AppResult<GuestStay> {
    let stay = guest_stay::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Guest stay {id} not found")))?;
    access::authorize(&state.pool, user, &stay.hotel_id).await?;
    Ok(stay)
}

/// POST /api/stays — check a guest in.
///
/// The stay and its optional advance payment commit in one transaction.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<GuestStayCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<StayLedger>>)> {
    access::authorize(&state.pool, &user, &req.hotel_id).await?;
    if hotel::find_by_id(&state.pool, &req.hotel_id).await?.is_none() {
        return Err(AppError::not_found(format!(
            "Hotel {} not found",
            req.hotel_id
        )));
    }

    validate_required_text(&req.guest_name, "guest_name", MAX_NAME_LEN)?;
    validate_required_text(&req.room_no, "room_no", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.phone_no, "phone_no", MAX_SHORT_TEXT_LEN)?;
    let checkin = time::parse_date(&req.checkin_date)?;
    time::parse_time(&req.checkin_time)?;

    if let Some(mode_id) = &req.payment_mode_id
        && payment_mode::find_by_id(&state.pool, mode_id).await?.is_none()
    {
        return Err(AppError::not_found(format!(
            "Payment mode {mode_id} not found"
        )));
    }

    let created = guest_stay::create(&state.pool, req).await?;
    tracing::info!(
        serial_no = created.serial_no,
        guest = %created.guest_name,
        "Guest checked in"
    );

    let as_of = time::today(state.config.timezone).max(checkin);
    let view = stay_ledger(&state, created, as_of).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(view, "Guest checked in")),
    ))
}

/// GET /api/stays/:id — stay with its running balance
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<ApiResponse<StayLedger>>> {
    let stay = load_authorized(&state, &user, &id).await?;
    let as_of = resolve_as_of(&state, &stay, query.date.as_deref())?;
    let view = stay_ledger(&state, stay, as_of).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// GET /api/hotels/:hotel_id/stays — paginated stays, each with pending
pub async fn list_by_hotel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(hotel_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ListResponse<StayLedger>>> {
    access::authorize(&state.pool, &user, &hotel_id).await?;

    let page = query.page.max(1);
    let limit = query.limit.max(1);
    let offset = (page - 1) * limit;

    let total = guest_stay::count_by_hotel(&state.pool, &hotel_id).await?;
    let stays = guest_stay::find_by_hotel(&state.pool, &hotel_id, limit, offset).await?;

    let mut records = Vec::with_capacity(stays.len());
    for stay in stays {
        let as_of = resolve_as_of(&state, &stay, None)?;
        records.push(stay_ledger(&state, stay, as_of).await?);
    }

    Ok(Json(ListResponse::paginated(
        records,
        Pagination::new(page, limit, total),
    )))
}

/// PUT /api/stays/:id — update stay details, refreshing the bill snapshot
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<GuestStayUpdate>,
) -> AppResult<Json<ApiResponse<StayLedger>>> {
    let stay = load_authorized(&state, &user, &id).await?;
    validate_optional_text(&req.guest_name, "guest_name", MAX_NAME_LEN)?;
    validate_optional_text(&req.room_no, "room_no", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.phone_no, "phone_no", MAX_SHORT_TEXT_LEN)?;

    let checkin = time::parse_date(&stay.checkin_date)?;
    let accrue_until = match &stay.checkout_date {
        Some(d) => time::parse_date(d)?,
        None => time::today(state.config.timezone).max(checkin),
    };
    let rent = req.rent.unwrap_or(stay.rent);
    let bill = to_f64(accrued_bill(to_decimal(rent), checkin, accrue_until).map_err(AppError::from)?);

    let updated = guest_stay::update(&state.pool, &id, req, bill).await?;
    let as_of = resolve_as_of(&state, &updated, None)?;
    let view = stay_ledger(&state, updated, as_of).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/stays/:id/checkout
pub async fn checkout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<StayLedger>>> {
    let stay = load_authorized(&state, &user, &id).await?;

    let tz = state.config.timezone;
    let checkin_at = time::datetime_millis(&stay.checkin_date, &stay.checkin_time, tz)?;
    let checkout_at = time::datetime_millis(&req.checkout_date, &req.checkout_time, tz)?;
    if checkout_at <= checkin_at {
        return Err(AppError::validation(
            "Check-out date/time must be after check-in date/time",
        ));
    }

    let checkin = time::parse_date(&stay.checkin_date)?;
    let checkout_date = time::parse_date(&req.checkout_date)?;
    let bill =
        to_f64(accrued_bill(to_decimal(stay.rent), checkin, checkout_date).map_err(AppError::from)?);

    let updated =
        guest_stay::checkout(&state.pool, &id, &req.checkout_date, &req.checkout_time, bill)
            .await?;
    tracing::info!(serial_no = updated.serial_no, "Guest checked out");

    let view = stay_ledger(&state, updated, checkout_date).await?;
    Ok(Json(ApiResponse::ok_with_message(view, "Guest checked out")))
}

/// POST /api/stays/:id/ledger — record a payment and/or expense.
///
/// Same-day same-type entries merge into one row instead of stacking up.
pub async fn record_ledger(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<LedgerEntryRequest>,
) -> AppResult<Json<ApiResponse<LedgerEntryResponse>>> {
    let stay = load_authorized(&state, &user, &id).await?;

    if let Some(payment) = &req.payment
        && let Some(date) = &payment.payment_date
    {
        time::parse_date(date)?;
    }

    let result = ledger::record_entry(&state.pool, state.config.timezone, &id, &req).await?;

    let as_of = resolve_as_of(&state, &stay, None)?;
    let breakdown =
        ledger::pending_for_stay(&state.pool, state.config.timezone, &stay, as_of).await?;

    Ok(Json(ApiResponse::ok_with_message(
        LedgerEntryResponse {
            transaction: result.transaction,
            expense: result.expense,
            pending_amount: money_string(breakdown.pending),
        },
        "Ledger entry recorded",
    )))
}

/// GET /api/stays/:id/pending — pending balance as of a date
pub async fn pending(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<ApiResponse<StayLedger>>> {
    let stay = load_authorized(&state, &user, &id).await?;
    let as_of = resolve_as_of(&state, &stay, query.date.as_deref())?;
    let view = stay_ledger(&state, stay, as_of).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// DELETE /api/stays/:id — hard delete; the serial number is never reused
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let stay = load_authorized(&state, &user, &id).await?;
    guest_stay::delete(&state.pool, &stay.id).await?;
    tracing::info!(serial_no = stay.serial_no, "Guest stay deleted");
    Ok(Json(ApiResponse::ok_with_message(true, "Guest stay deleted")))
}
