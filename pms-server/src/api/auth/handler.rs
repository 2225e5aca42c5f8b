//! Authentication Handlers
//!
//! Login, bootstrap registration and current-user lookup

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::ApiResponse;
use shared::models::{LoginRequest, LoginResponse, UserCreate, UserInfo, UserRole};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
///
/// Authenticates credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let found = user::find_by_username(&state.pool, &req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let account = match found {
        Some(u) => {
            if !u.is_active {
                return Err(AppError::access_denied("Account has been disabled"));
            }

            let password_valid = password::verify_password(&req.password, &u.hash_pass)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(
            &account.id,
            &account.username,
            &account.display_name,
            account.role,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    let expires_in = jwt_service.config.expiration_minutes * 60;

    tracing::info!(username = %account.username, role = %account.role, "Login successful");

    Ok(Json(ApiResponse::ok_with_message(
        LoginResponse {
            token,
            expires_in,
            user: account.into(),
        },
        "Login successful",
    )))
}

/// POST /api/auth/register
///
/// Bootstrap registration: creates the first admin account. Once any
/// admin exists, further registration goes through /api/users.
pub async fn register(
    State(state): State<ServerState>,
    Json(mut req): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserInfo>>)> {
    validate_required_text(&req.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&req.display_name, "display_name", MAX_NAME_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let admin_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE role = 'admin'")
            .fetch_one(&state.pool)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
    if admin_count > 0 {
        return Err(AppError::access_denied(
            "Registration is closed: ask an admin to create your account",
        ));
    }

    req.role = UserRole::Admin;
    let created = user::create(&state.pool, req).await?;

    tracing::info!(username = %created.username, "Bootstrap admin registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            created.into(),
            "Admin account created",
        )),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let account = user::find_by_id(&state.pool, &current.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(ApiResponse::ok(account.into())))
}
