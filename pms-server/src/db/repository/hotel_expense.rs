//! Hotel Expense Repository (hotel-side expense book)

use super::{RepoError, RepoResult};
use crate::ledger::money::validate_amount;
use shared::models::{HotelExpense, HotelExpenseCreate, HotelExpenseUpdate};
use sqlx::SqlitePool;

const EXPENSE_SELECT: &str = "SELECT id, hotel_id, title, amount, payment_mode_id, expense_date, created_by, created_at, updated_at FROM hotel_expense";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<HotelExpense>> {
    let sql = format!("{EXPENSE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, HotelExpense>(&sql)
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
) -> RepoResult<Vec<HotelExpense>> {
    let sql = format!(
        "{EXPENSE_SELECT} WHERE hotel_id = ? ORDER BY expense_date DESC, created_at DESC LIMIT ? OFFSET ?"
    );
    let rows = sqlx::query_as::<_, HotelExpense>(&sql)
        .bind(hotel_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_by_hotel(pool: &SqlitePool, hotel_id: &str) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotel_expense WHERE hotel_id = ?")
        .bind(hotel_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(
    pool: &SqlitePool,
    hotel_id: &str,
    created_by: &str,
    expense_date: &str,
    data: HotelExpenseCreate,
) -> RepoResult<HotelExpense> {
    validate_amount(data.amount, "amount")?;

    let now = shared::util::now_millis();
    let id = shared::util::new_id();
    sqlx::query(
        "INSERT INTO hotel_expense (id, hotel_id, title, amount, payment_mode_id, expense_date, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(&id)
    .bind(hotel_id)
    .bind(&data.title)
    .bind(data.amount)
    .bind(&data.payment_mode_id)
    .bind(expense_date)
    .bind(created_by)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create hotel expense".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    data: HotelExpenseUpdate,
) -> RepoResult<HotelExpense> {
    if let Some(amount) = data.amount {
        validate_amount(amount, "amount")?;
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE hotel_expense SET title = COALESCE(?1, title), amount = COALESCE(?2, amount), payment_mode_id = COALESCE(?3, payment_mode_id), expense_date = COALESCE(?4, expense_date), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.title)
    .bind(data.amount)
    .bind(&data.payment_mode_id)
    .bind(&data.expense_date)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Hotel expense {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Hotel expense {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM hotel_expense WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
