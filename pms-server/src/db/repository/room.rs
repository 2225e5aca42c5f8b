//! Room Repository

use super::{RepoError, RepoResult};
use shared::models::{Room, RoomCreate, RoomUpdate};
use sqlx::SqlitePool;

const ROOM_SELECT: &str =
    "SELECT id, hotel_id, category_id, room_no, floor, created_at, updated_at FROM room";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Room>> {
    let sql = format!("{ROOM_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Room>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_hotel(pool: &SqlitePool, hotel_id: &str) -> RepoResult<Vec<Room>> {
    let sql = format!("{ROOM_SELECT} WHERE hotel_id = ? ORDER BY room_no");
    let rows = sqlx::query_as::<_, Room>(&sql)
        .bind(hotel_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, hotel_id: &str, data: RoomCreate) -> RepoResult<Room> {
    let now = shared::util::now_millis();
    let id = shared::util::new_id();
    let result = sqlx::query(
        "INSERT INTO room (id, hotel_id, category_id, room_no, floor, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(&id)
    .bind(hotel_id)
    .bind(&data.category_id)
    .bind(&data.room_no)
    .bind(data.floor)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(e) => {
            return Err(match RepoError::from(e) {
                RepoError::Duplicate(_) => RepoError::Duplicate(format!(
                    "Room {} already exists in this hotel",
                    data.room_no
                )),
                other => other,
            });
        }
    }

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, data: RoomUpdate) -> RepoResult<Room> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE room SET room_no = COALESCE(?1, room_no), category_id = COALESCE(?2, category_id), floor = COALESCE(?3, floor), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.room_no)
    .bind(&data.category_id)
    .bind(data.floor)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM room WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
