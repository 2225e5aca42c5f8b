//! Hotel-Day Rollup Repository
//!
//! For a hotel and a target date: the currently relevant stays, each with
//! that date's payments, food charges and cumulative pending balance, plus
//! hotel-wide totals. The stay list is paginated, but the totals always
//! cover the entire relevant set — they must not be paginated away.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use super::RepoResult;
use crate::ledger::money::money_string;
use crate::utils::time::{day_end_millis, day_start_millis};
use shared::models::{DayReport, GuestStay, StayDayRecord};
use shared::response::Pagination;

const STAY_SELECT: &str = "SELECT id, hotel_id, serial_no, guest_name, phone_no, room_no, checkin_date, checkin_time, checkout_date, checkout_time, rent, bill, created_at, updated_at FROM guest_stay";

/// Stays relevant to a hotel day: checked in on or before the date and
/// either still resident or checking out that very day.
async fn find_relevant_stays(
    pool: &SqlitePool,
    hotel_id: &str,
    date: &str,
) -> RepoResult<Vec<GuestStay>> {
    let sql = format!(
        "{STAY_SELECT} WHERE hotel_id = ?1 AND checkin_date <= ?2 AND (checkout_date IS NULL OR checkout_date = ?2) ORDER BY serial_no"
    );
    let rows = sqlx::query_as::<_, GuestStay>(&sql)
        .bind(hotel_id)
        .bind(date)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Build the day report for (hotel, date).
pub async fn day_report(
    pool: &SqlitePool,
    tz: Tz,
    hotel_id: &str,
    date: NaiveDate,
    page: i64,
    limit: i64,
) -> RepoResult<DayReport> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let day_start = day_start_millis(date, tz);
    let day_end = day_end_millis(date, tz);

    let stays = find_relevant_stays(pool, hotel_id, &date_str).await?;

    // Totals run over the whole relevant set; pagination only slices the
    // record list. The set is bounded by hotel size, so building every
    // record before slicing is fine.
    let mut records = Vec::with_capacity(stays.len());
    let mut total_sales = Decimal::ZERO;
    let mut total_pending = Decimal::ZERO;

    for stay in stays {
        let transactions =
            super::ledger::find_transactions(pool, &stay.id, day_start, day_end).await?;
        let expenses = super::ledger::find_expenses(pool, &stay.id, day_start, day_end).await?;
        let day_food = crate::ledger::money::to_decimal(
            super::ledger::sum_food_expenses(pool, &stay.id, day_start, day_end).await?,
        );
        let breakdown = super::ledger::pending_for_stay(pool, tz, &stay, date).await?;

        total_sales += breakdown.accrued + day_food;
        total_pending += breakdown.pending;

        records.push(StayDayRecord {
            stay,
            transactions,
            expenses,
            food_expense: money_string(day_food),
            accrued_bill: money_string(breakdown.accrued),
            pending_amount: money_string(breakdown.pending),
        });
    }

    let total = records.len() as i64;
    let page = page.max(1);
    let limit = limit.max(1);
    let offset = (page - 1) * limit;
    let page_records: Vec<StayDayRecord> = records
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    Ok(DayReport {
        date: date_str,
        records: page_records,
        pagination: Pagination::new(page, limit, total),
        today_total_sales: money_string(total_sales),
        total_pending: money_string(total_pending),
    })
}
