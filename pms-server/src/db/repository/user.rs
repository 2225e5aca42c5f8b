//! User Repository

use super::{RepoError, RepoResult};
use crate::auth::password;
use shared::models::{User, UserCreate, UserUpdate};
use sqlx::SqlitePool;

const USER_SELECT: &str = "SELECT id, username, display_name, hash_pass, role, is_active, created_at, updated_at FROM user";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE username = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// List manager accounts (for admin administration screens)
pub async fn find_managers(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let sql = format!("{USER_SELECT} WHERE role = 'manager' ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    if find_by_username(pool, &data.username).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Username {} already exists",
            data.username
        )));
    }

    let hash_pass = password::hash_password(&data.password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

    let now = shared::util::now_millis();
    let id = shared::util::new_id();
    sqlx::query(
        "INSERT INTO user (id, username, display_name, hash_pass, role, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
    )
    .bind(&id)
    .bind(&data.username)
    .bind(&data.display_name)
    .bind(&hash_pass)
    .bind(data.role.as_str())
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, data: UserUpdate) -> RepoResult<User> {
    let hash_pass = match &data.password {
        Some(pw) => Some(
            password::hash_password(pw)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?,
        ),
        None => None,
    };

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE user SET display_name = COALESCE(?1, display_name), hash_pass = COALESCE(?2, hash_pass), is_active = COALESCE(?3, is_active), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.display_name)
    .bind(&hash_pass)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}
