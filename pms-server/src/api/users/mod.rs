//! User administration API module (admin only)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::middleware::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update))
        .route_layer(middleware::from_fn(require_admin))
}
