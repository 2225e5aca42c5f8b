//! Guest Ledger Repository
//!
//! The aggregation queries behind the pending-balance formula and the
//! same-day merge write path. Every endpoint that reports a balance goes
//! through [`pending_for_stay`] — the formula lives here and in
//! `ledger::pending`, nowhere else.

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::ledger::money::{to_decimal, to_f64, validate_amount};
use crate::ledger::pending::{accrued_bill, pending_balance};
use crate::utils::time::{day_end_millis, day_start_millis, today};
use shared::models::{
    ExpenseInput, GuestExpense, GuestStay, GuestTransaction, LedgerEntryRequest, PaymentInput,
};

const TXN_SELECT: &str = "SELECT id, booking_id, payment_type, payment_mode_id, amount, payment_date, created_at, updated_at FROM guest_transaction";

const EXPENSE_SELECT: &str =
    "SELECT id, booking_id, expense_type, amount, created_at, updated_at FROM guest_expense";

/// Pending-balance breakdown for a stay over a date window
#[derive(Debug, Clone)]
pub struct PendingBreakdown {
    pub accrued: Decimal,
    pub food: Decimal,
    pub payments: Decimal,
    pub pending: Decimal,
}

/// Result of a merged ledger write
#[derive(Debug, Clone)]
pub struct LedgerEntryResult {
    pub transaction: Option<GuestTransaction>,
    pub expense: Option<GuestExpense>,
}

/// Sum food expenses for a booking with created_at in `[start, end)`
pub async fn sum_food_expenses(
    pool: &SqlitePool,
    booking_id: &str,
    start: i64,
    end: i64,
) -> RepoResult<f64> {
    let sum: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount), 0.0) FROM guest_expense WHERE booking_id = ?1 AND expense_type = 'food' AND created_at >= ?2 AND created_at < ?3",
    )
    .bind(booking_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(sum)
}

/// Sum qualifying payments (advance, partial, final) for a booking with
/// created_at in `[start, end)`
pub async fn sum_payments(
    pool: &SqlitePool,
    booking_id: &str,
    start: i64,
    end: i64,
) -> RepoResult<f64> {
    let sum: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount), 0.0) FROM guest_transaction WHERE booking_id = ?1 AND payment_type IN ('advance', 'partial', 'final') AND created_at >= ?2 AND created_at < ?3",
    )
    .bind(booking_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(sum)
}

/// Transactions recorded for a booking with created_at in `[start, end)`
pub async fn find_transactions(
    pool: &SqlitePool,
    booking_id: &str,
    start: i64,
    end: i64,
) -> RepoResult<Vec<GuestTransaction>> {
    let sql = format!(
        "{TXN_SELECT} WHERE booking_id = ?1 AND created_at >= ?2 AND created_at < ?3 ORDER BY created_at"
    );
    let rows = sqlx::query_as::<_, GuestTransaction>(&sql)
        .bind(booking_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Expenses recorded for a booking with created_at in `[start, end)`
pub async fn find_expenses(
    pool: &SqlitePool,
    booking_id: &str,
    start: i64,
    end: i64,
) -> RepoResult<Vec<GuestExpense>> {
    let sql = format!(
        "{EXPENSE_SELECT} WHERE booking_id = ?1 AND created_at >= ?2 AND created_at < ?3 ORDER BY created_at"
    );
    let rows = sqlx::query_as::<_, GuestExpense>(&sql)
        .bind(booking_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Pending balance for an already-fetched stay as of a date.
///
/// Window: `[checkin 00:00, as_of 23:59:59]` in the business timezone.
pub async fn pending_for_stay(
    pool: &SqlitePool,
    tz: Tz,
    stay: &GuestStay,
    as_of: NaiveDate,
) -> RepoResult<PendingBreakdown> {
    let checkin = NaiveDate::parse_from_str(&stay.checkin_date, "%Y-%m-%d").map_err(|_| {
        RepoError::Database(format!(
            "Stored check-in date is malformed: {}",
            stay.checkin_date
        ))
    })?;

    let accrued = accrued_bill(to_decimal(stay.rent), checkin, as_of)?;

    let start = day_start_millis(checkin, tz);
    let end = day_end_millis(as_of, tz);
    let food = to_decimal(sum_food_expenses(pool, &stay.id, start, end).await?);
    let payments = to_decimal(sum_payments(pool, &stay.id, start, end).await?);

    Ok(PendingBreakdown {
        accrued,
        food,
        payments,
        pending: pending_balance(accrued, food, payments),
    })
}

/// Pending balance for a booking id as of a date
pub async fn compute_pending(
    pool: &SqlitePool,
    tz: Tz,
    booking_id: &str,
    as_of: NaiveDate,
) -> RepoResult<PendingBreakdown> {
    let stay = super::guest_stay::find_by_id(pool, booking_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Guest stay {booking_id} not found")))?;
    pending_for_stay(pool, tz, &stay, as_of).await
}

/// Record a payment and/or expense against a booking, in one transaction.
///
/// Merge policy: an entry of the same type already created today (local
/// midnight-to-midnight window) absorbs the new amount instead of a new
/// row being inserted. The read-check and the insert run inside one
/// transaction but take no row lock, so two concurrent calls can both
/// miss the check and both insert — a known race window; the fix would
/// be a unique index on the (booking, type, day) bucket plus a
/// conditional update.
pub async fn record_entry(
    pool: &SqlitePool,
    tz: Tz,
    booking_id: &str,
    req: &LedgerEntryRequest,
) -> RepoResult<LedgerEntryResult> {
    if req.payment.is_none() && req.expense.is_none() {
        return Err(RepoError::Validation(
            "Nothing to record: provide a payment and/or an expense".to_string(),
        ));
    }

    if super::guest_stay::find_by_id(pool, booking_id).await?.is_none() {
        return Err(RepoError::NotFound(format!(
            "Guest stay {booking_id} not found"
        )));
    }

    if let Some(payment) = &req.payment {
        validate_amount(payment.amount, "payment amount")?;
        if let Some(mode_id) = &payment.payment_mode_id
            && super::payment_mode::find_by_id(pool, mode_id).await?.is_none()
        {
            return Err(RepoError::NotFound(format!(
                "Payment mode {mode_id} not found"
            )));
        }
    }
    if let Some(expense) = &req.expense {
        validate_amount(expense.amount, "expense amount")?;
    }

    let business_date = today(tz);
    let day_start = day_start_millis(business_date, tz);
    let day_end = day_end_millis(business_date, tz);
    let now = shared::util::now_millis();

    let mut tx = pool.begin().await?;

    let txn_id = match &req.payment {
        Some(payment) => Some(
            merge_payment(&mut tx, booking_id, payment, business_date, day_start, day_end, now)
                .await?,
        ),
        None => None,
    };

    let expense_id = match &req.expense {
        Some(expense) => Some(
            merge_expense(&mut tx, booking_id, expense, day_start, day_end, now).await?,
        ),
        None => None,
    };

    tx.commit().await?;

    let transaction = match txn_id {
        Some(id) => {
            let sql = format!("{TXN_SELECT} WHERE id = ?");
            sqlx::query_as::<_, GuestTransaction>(&sql)
                .bind(&id)
                .fetch_optional(pool)
                .await?
        }
        None => None,
    };
    let expense = match expense_id {
        Some(id) => {
            let sql = format!("{EXPENSE_SELECT} WHERE id = ?");
            sqlx::query_as::<_, GuestExpense>(&sql)
                .bind(&id)
                .fetch_optional(pool)
                .await?
        }
        None => None,
    };

    Ok(LedgerEntryResult {
        transaction,
        expense,
    })
}

/// Merge a payment into today's row of the same type, or insert one.
/// Returns the id of the touched row.
async fn merge_payment(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    booking_id: &str,
    payment: &PaymentInput,
    business_date: NaiveDate,
    day_start: i64,
    day_end: i64,
    now: i64,
) -> RepoResult<String> {
    let existing: Option<(String, f64)> = sqlx::query_as(
        "SELECT id, amount FROM guest_transaction WHERE booking_id = ?1 AND payment_type = ?2 AND created_at >= ?3 AND created_at < ?4 LIMIT 1",
    )
    .bind(booking_id)
    .bind(payment.payment_type.as_str())
    .bind(day_start)
    .bind(day_end)
    .fetch_optional(&mut **tx)
    .await?;

    match existing {
        Some((id, amount)) => {
            let merged = to_f64(to_decimal(amount) + to_decimal(payment.amount));
            sqlx::query("UPDATE guest_transaction SET amount = ?1, updated_at = ?2 WHERE id = ?3")
                .bind(merged)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok(id)
        }
        None => {
            let id = shared::util::new_id();
            let payment_date = payment
                .payment_date
                .clone()
                .unwrap_or_else(|| business_date.format("%Y-%m-%d").to_string());
            sqlx::query(
                "INSERT INTO guest_transaction (id, booking_id, payment_type, payment_mode_id, amount, payment_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            )
            .bind(&id)
            .bind(booking_id)
            .bind(payment.payment_type.as_str())
            .bind(&payment.payment_mode_id)
            .bind(payment.amount)
            .bind(&payment_date)
            .bind(now)
            .execute(&mut **tx)
            .await?;
            Ok(id)
        }
    }
}

/// Merge an expense into today's row of the same type, or insert one.
/// Returns the id of the touched row.
async fn merge_expense(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    booking_id: &str,
    expense: &ExpenseInput,
    day_start: i64,
    day_end: i64,
    now: i64,
) -> RepoResult<String> {
    let existing: Option<(String, f64)> = sqlx::query_as(
        "SELECT id, amount FROM guest_expense WHERE booking_id = ?1 AND expense_type = ?2 AND created_at >= ?3 AND created_at < ?4 LIMIT 1",
    )
    .bind(booking_id)
    .bind(expense.expense_type.as_str())
    .bind(day_start)
    .bind(day_end)
    .fetch_optional(&mut **tx)
    .await?;

    match existing {
        Some((id, amount)) => {
            let merged = to_f64(to_decimal(amount) + to_decimal(expense.amount));
            sqlx::query("UPDATE guest_expense SET amount = ?1, updated_at = ?2 WHERE id = ?3")
                .bind(merged)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok(id)
        }
        None => {
            let id = shared::util::new_id();
            sqlx::query(
                "INSERT INTO guest_expense (id, booking_id, expense_type, amount, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            )
            .bind(&id)
            .bind(booking_id)
            .bind(expense.expense_type.as_str())
            .bind(expense.amount)
            .bind(now)
            .execute(&mut **tx)
            .await?;
            Ok(id)
        }
    }
}
