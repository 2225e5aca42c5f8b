//! Hotel Assignment Repository
//!
//! Manager-to-hotel access is a status flag, not row existence: revoking
//! flips status to inactive, re-assigning flips it back. One row per
//! (hotel, manager), enforced by a unique index.

use super::{RepoError, RepoResult};
use shared::models::{AssignmentStatus, HotelAssignment, UserRole};
use sqlx::SqlitePool;
use std::str::FromStr;

const ASSIGNMENT_SELECT: &str = "SELECT id, hotel_id, manager_id, status, created_at, updated_at FROM hotel_assignment";

pub async fn find(
    pool: &SqlitePool,
    hotel_id: &str,
    manager_id: &str,
) -> RepoResult<Option<HotelAssignment>> {
    let sql = format!("{ASSIGNMENT_SELECT} WHERE hotel_id = ? AND manager_id = ?");
    let row = sqlx::query_as::<_, HotelAssignment>(&sql)
        .bind(hotel_id)
        .bind(manager_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_hotel(pool: &SqlitePool, hotel_id: &str) -> RepoResult<Vec<HotelAssignment>> {
    let sql = format!("{ASSIGNMENT_SELECT} WHERE hotel_id = ? ORDER BY created_at");
    let rows = sqlx::query_as::<_, HotelAssignment>(&sql)
        .bind(hotel_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Assignment status for (hotel, manager), if any row exists
pub async fn find_status(
    pool: &SqlitePool,
    hotel_id: &str,
    manager_id: &str,
) -> RepoResult<Option<AssignmentStatus>> {
    let status: Option<String> = sqlx::query_scalar(
        "SELECT status FROM hotel_assignment WHERE hotel_id = ? AND manager_id = ?",
    )
    .bind(hotel_id)
    .bind(manager_id)
    .fetch_optional(pool)
    .await?;

    match status {
        Some(s) => AssignmentStatus::from_str(&s)
            .map(Some)
            .map_err(RepoError::Database),
        None => Ok(None),
    }
}

/// Assign a manager to a hotel, reactivating an existing row instead of
/// inserting a duplicate.
pub async fn assign(
    pool: &SqlitePool,
    hotel_id: &str,
    manager_id: &str,
) -> RepoResult<HotelAssignment> {
    let manager = super::user::find_by_id(pool, manager_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Manager {manager_id} not found")))?;
    if manager.role != UserRole::Manager {
        return Err(RepoError::Validation(format!(
            "User {} is not a manager",
            manager.username
        )));
    }

    let now = shared::util::now_millis();
    if find(pool, hotel_id, manager_id).await?.is_some() {
        sqlx::query(
            "UPDATE hotel_assignment SET status = 'active', updated_at = ?1 WHERE hotel_id = ?2 AND manager_id = ?3",
        )
        .bind(now)
        .bind(hotel_id)
        .bind(manager_id)
        .execute(pool)
        .await?;
    } else {
        let id = shared::util::new_id();
        sqlx::query(
            "INSERT INTO hotel_assignment (id, hotel_id, manager_id, status, created_at, updated_at) VALUES (?1, ?2, ?3, 'active', ?4, ?4)",
        )
        .bind(&id)
        .bind(hotel_id)
        .bind(manager_id)
        .bind(now)
        .execute(pool)
        .await?;
    }

    find(pool, hotel_id, manager_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to assign manager".into()))
}

/// Revoke a manager's access to a hotel (status flip, not a delete)
pub async fn revoke(pool: &SqlitePool, hotel_id: &str, manager_id: &str) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE hotel_assignment SET status = 'inactive', updated_at = ?1 WHERE hotel_id = ?2 AND manager_id = ?3 AND status = 'active'",
    )
    .bind(now)
    .bind(hotel_id)
    .bind(manager_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Active assignment for manager {manager_id} not found"
        )));
    }
    Ok(true)
}
