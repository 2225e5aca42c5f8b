//! Payment Mode Repository

use super::{RepoError, RepoResult};
use shared::models::{PaymentMode, PaymentModeCreate, PaymentModeUpdate};
use sqlx::SqlitePool;

const MODE_SELECT: &str =
    "SELECT id, payment_mode, created_by, created_at, updated_at FROM payment_mode";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<PaymentMode>> {
    let sql = format!("{MODE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, PaymentMode>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Payment modes created by a user (creator-scoped catalog)
pub async fn find_by_creator(pool: &SqlitePool, created_by: &str) -> RepoResult<Vec<PaymentMode>> {
    let sql = format!("{MODE_SELECT} WHERE created_by = ? ORDER BY payment_mode");
    let rows = sqlx::query_as::<_, PaymentMode>(&sql)
        .bind(created_by)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(
    pool: &SqlitePool,
    created_by: &str,
    data: PaymentModeCreate,
) -> RepoResult<PaymentMode> {
    let now = shared::util::now_millis();
    let id = shared::util::new_id();
    sqlx::query(
        "INSERT INTO payment_mode (id, payment_mode, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
    )
    .bind(&id)
    .bind(&data.payment_mode)
    .bind(created_by)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment mode".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    data: PaymentModeUpdate,
) -> RepoResult<PaymentMode> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE payment_mode SET payment_mode = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(&data.payment_mode)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Payment mode {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Payment mode {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM payment_mode WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
