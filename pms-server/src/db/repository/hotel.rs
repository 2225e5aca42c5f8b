//! Hotel Repository

use super::{RepoError, RepoResult};
use shared::models::{Hotel, HotelCreate, HotelUpdate};
use sqlx::SqlitePool;

const HOTEL_SELECT: &str = "SELECT id, name, address, phone, total_rooms, created_by, created_at, updated_at FROM hotel";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Hotel>> {
    let sql = format!("{HOTEL_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Hotel>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Hotels created by an admin (the admin's listing scope)
pub async fn find_for_admin(pool: &SqlitePool, admin_id: &str) -> RepoResult<Vec<Hotel>> {
    let sql = format!("{HOTEL_SELECT} WHERE created_by = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Hotel>(&sql)
        .bind(admin_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Hotels a manager holds an active assignment for
pub async fn find_for_manager(pool: &SqlitePool, manager_id: &str) -> RepoResult<Vec<Hotel>> {
    let rows = sqlx::query_as::<_, Hotel>(
        "SELECT h.id, h.name, h.address, h.phone, h.total_rooms, h.created_by, h.created_at, h.updated_at FROM hotel h JOIN hotel_assignment a ON a.hotel_id = h.id WHERE a.manager_id = ? AND a.status = 'active' ORDER BY h.created_at DESC",
    )
    .bind(manager_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, created_by: &str, data: HotelCreate) -> RepoResult<Hotel> {
    let now = shared::util::now_millis();
    let id = shared::util::new_id();
    sqlx::query(
        "INSERT INTO hotel (id, name, address, phone, total_rooms, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(&id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(data.total_rooms)
    .bind(created_by)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create hotel".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, data: HotelUpdate) -> RepoResult<Hotel> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE hotel SET name = COALESCE(?1, name), address = COALESCE(?2, address), phone = COALESCE(?3, phone), total_rooms = COALESCE(?4, total_rooms), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(data.total_rooms)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Hotel {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Hotel {id} not found")))
}

/// Delete a hotel. Guest history is never cascaded: a hotel with stays
/// cannot be deleted (FK RESTRICT backs the explicit check).
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let stay_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM guest_stay WHERE hotel_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if stay_count > 0 {
        return Err(RepoError::Conflict(format!(
            "Hotel has {stay_count} guest stays and cannot be deleted"
        )));
    }

    let rows = sqlx::query("DELETE FROM hotel WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
