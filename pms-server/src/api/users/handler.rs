//! User Administration Handlers (admin only)

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text};
use shared::models::{UserCreate, UserInfo, UserUpdate};
use shared::{ApiResponse, ListResponse};

/// GET /api/users — list manager accounts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ListResponse<UserInfo>>> {
    let managers = user::find_managers(&state.pool).await?;
    Ok(Json(ListResponse::ok(
        managers.into_iter().map(UserInfo::from).collect(),
    )))
}

/// POST /api/users — create a user (manager or another admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserInfo>>)> {
    validate_required_text(&req.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&req.display_name, "display_name", MAX_NAME_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let created = user::create(&state.pool, req).await?;
    tracing::info!(username = %created.username, role = %created.role, "User created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(created.into(), "User created")),
    ))
}

/// PUT /api/users/:id — update a user (rename, password reset, de/activate)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<UserUpdate>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let updated = user::update(&state.pool, &id, req).await?;
    Ok(Json(ApiResponse::ok(updated.into())))
}
