//! Menu Repository

use super::{RepoError, RepoResult};
use crate::ledger::money::validate_amount;
use shared::models::{Menu, MenuCreate, MenuUpdate};
use sqlx::SqlitePool;
use std::collections::HashMap;

const MENU_SELECT: &str = "SELECT id, name, half_plate_price, full_plate_price, created_by, created_at, updated_at FROM menu";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Menu>> {
    let sql = format!("{MENU_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Menu>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Menus created by a user (creator-scoped catalog)
pub async fn find_by_creator(pool: &SqlitePool, created_by: &str) -> RepoResult<Vec<Menu>> {
    let sql = format!("{MENU_SELECT} WHERE created_by = ? ORDER BY name");
    let rows = sqlx::query_as::<_, Menu>(&sql)
        .bind(created_by)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch a set of menus by id, keyed for line pricing
pub async fn find_by_ids(
    pool: &SqlitePool,
    ids: &[String],
) -> RepoResult<HashMap<String, Menu>> {
    let mut menus = HashMap::with_capacity(ids.len());
    for id in ids {
        if menus.contains_key(id) {
            continue;
        }
        if let Some(menu) = find_by_id(pool, id).await? {
            menus.insert(id.clone(), menu);
        }
    }
    Ok(menus)
}

pub async fn create(pool: &SqlitePool, created_by: &str, data: MenuCreate) -> RepoResult<Menu> {
    if let Some(half) = data.half_plate_price {
        validate_amount(half, "half_plate_price")?;
    }
    validate_amount(data.full_plate_price, "full_plate_price")?;

    let now = shared::util::now_millis();
    let id = shared::util::new_id();
    sqlx::query(
        "INSERT INTO menu (id, name, half_plate_price, full_plate_price, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(&id)
    .bind(&data.name)
    .bind(data.half_plate_price)
    .bind(data.full_plate_price)
    .bind(created_by)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, data: MenuUpdate) -> RepoResult<Menu> {
    if let Some(half) = data.half_plate_price {
        validate_amount(half, "half_plate_price")?;
    }
    if let Some(full) = data.full_plate_price {
        validate_amount(full, "full_plate_price")?;
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu SET name = COALESCE(?1, name), half_plate_price = COALESCE(?2, half_plate_price), full_plate_price = COALESCE(?3, full_plate_price), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(data.half_plate_price)
    .bind(data.full_plate_price)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
