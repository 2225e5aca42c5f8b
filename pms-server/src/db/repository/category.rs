//! Room Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use sqlx::SqlitePool;

const CATEGORY_SELECT: &str =
    "SELECT id, hotel_id, name, created_at, updated_at FROM category";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_hotel(pool: &SqlitePool, hotel_id: &str) -> RepoResult<Vec<Category>> {
    let sql = format!("{CATEGORY_SELECT} WHERE hotel_id = ? ORDER BY name");
    let rows = sqlx::query_as::<_, Category>(&sql)
        .bind(hotel_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(
    pool: &SqlitePool,
    hotel_id: &str,
    data: CategoryCreate,
) -> RepoResult<Category> {
    let now = shared::util::now_millis();
    let id = shared::util::new_id();
    let result = sqlx::query(
        "INSERT INTO category (id, hotel_id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
    )
    .bind(&id)
    .bind(hotel_id)
    .bind(&data.name)
    .bind(now)
    .execute(pool)
    .await;

    if let Err(e) = result {
        return Err(match RepoError::from(e) {
            RepoError::Duplicate(_) => {
                RepoError::Duplicate(format!("Category {} already exists", data.name))
            }
            other => other,
        });
    }

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
    let now = shared::util::now_millis();
    let result = sqlx::query("UPDATE category SET name = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(&data.name)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await;

    match result {
        Ok(rows) if rows.rows_affected() == 0 => {
            return Err(RepoError::NotFound(format!("Category {id} not found")));
        }
        Ok(_) => {}
        Err(e) => {
            return Err(match RepoError::from(e) {
                RepoError::Duplicate(_) => {
                    RepoError::Duplicate(format!("Category {} already exists", data.name))
                }
                other => other,
            });
        }
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
