//! Guest Stay Repository

use super::{RepoError, RepoResult};
use crate::ledger::money::validate_amount;
use shared::models::{GuestStay, GuestStayCreate, GuestStayUpdate, PaymentType};
use sqlx::SqlitePool;

const STAY_SELECT: &str = "SELECT id, hotel_id, serial_no, guest_name, phone_no, room_no, checkin_date, checkin_time, checkout_date, checkout_time, rent, bill, created_at, updated_at FROM guest_stay";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<GuestStay>> {
    let sql = format!("{STAY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, GuestStay>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_hotel(
    pool: &SqlitePool,
    hotel_id: &str,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<GuestStay>> {
    let sql =
        format!("{STAY_SELECT} WHERE hotel_id = ? ORDER BY serial_no DESC LIMIT ? OFFSET ?");
    let rows = sqlx::query_as::<_, GuestStay>(&sql)
        .bind(hotel_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_by_hotel(pool: &SqlitePool, hotel_id: &str) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guest_stay WHERE hotel_id = ?")
        .bind(hotel_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Check a guest in.
///
/// One transaction covers the serial draw, the stay insert and, when an
/// advance amount is supplied, the first payment ledger entry — the stay
/// and its advance commit or fail together. Serials come from the
/// counter table (`UPDATE .. RETURNING`), so they are monotonic and
/// never reused even after deletes.
pub async fn create(pool: &SqlitePool, data: GuestStayCreate) -> RepoResult<GuestStay> {
    validate_amount(data.rent, "rent")?;
    if let Some(advance) = data.advance_amount {
        validate_amount(advance, "advance_amount")?;
    }

    let now = shared::util::now_millis();
    let id = shared::util::new_id();

    let mut tx = pool.begin().await?;

    let serial_no: i64 =
        sqlx::query_scalar("UPDATE serial_counter SET value = value + 1 WHERE id = 1 RETURNING value")
            .fetch_one(&mut *tx)
            .await?;

    // bill snapshot at check-in: one night's rent (both window endpoints count)
    sqlx::query(
        "INSERT INTO guest_stay (id, hotel_id, serial_no, guest_name, phone_no, room_no, checkin_date, checkin_time, rent, bill, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9, ?10, ?10)",
    )
    .bind(&id)
    .bind(&data.hotel_id)
    .bind(serial_no)
    .bind(&data.guest_name)
    .bind(&data.phone_no)
    .bind(&data.room_no)
    .bind(&data.checkin_date)
    .bind(&data.checkin_time)
    .bind(data.rent)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    if let Some(advance) = data.advance_amount
        && advance > 0.0
    {
        let txn_id = shared::util::new_id();
        sqlx::query(
            "INSERT INTO guest_transaction (id, booking_id, payment_type, payment_mode_id, amount, payment_date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        )
        .bind(&txn_id)
        .bind(&id)
        .bind(PaymentType::Advance.as_str())
        .bind(&data.payment_mode_id)
        .bind(advance)
        .bind(&data.checkin_date)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create guest stay".into()))
}

/// Update stay details. `bill` is the refreshed accrual snapshot computed
/// by the caller through the ledger formula.
pub async fn update(
    pool: &SqlitePool,
    id: &str,
    data: GuestStayUpdate,
    bill: f64,
) -> RepoResult<GuestStay> {
    if let Some(rent) = data.rent {
        validate_amount(rent, "rent")?;
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE guest_stay SET guest_name = COALESCE(?1, guest_name), phone_no = COALESCE(?2, phone_no), room_no = COALESCE(?3, room_no), rent = COALESCE(?4, rent), bill = ?5, updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.guest_name)
    .bind(&data.phone_no)
    .bind(&data.room_no)
    .bind(data.rent)
    .bind(bill)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Guest stay {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Guest stay {id} not found")))
}

/// Record checkout. Ordering against check-in is validated by the caller;
/// `bill` is the final accrual through the checkout date.
pub async fn checkout(
    pool: &SqlitePool,
    id: &str,
    checkout_date: &str,
    checkout_time: &str,
    bill: f64,
) -> RepoResult<GuestStay> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE guest_stay SET checkout_date = ?1, checkout_time = ?2, bill = ?3, updated_at = ?4 WHERE id = ?5",
    )
    .bind(checkout_date)
    .bind(checkout_time)
    .bind(bill)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Guest stay {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Guest stay {id} not found")))
}

/// Hard delete. Transactions, expenses and food orders cascade; the
/// serial number is never freed for reuse.
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM guest_stay WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
