//! Health API (public liveness probe)

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health
async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthStatus>> {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => "up",
        Err(e) => {
            tracing::warn!("Health check database probe failed: {}", e);
            "down"
        }
    };

    Ok(Json(HealthStatus {
        status: "ok",
        database,
    }))
}
