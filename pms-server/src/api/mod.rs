//! API route modules
//!
//! # Structure
//!
//! - [`health`] — liveness probe (public)
//! - [`auth`] — login, bootstrap registration, current user
//! - [`users`] — manager administration (admin only)
//! - [`hotels`] — hotel CRUD, manager assignment, day report
//! - [`rooms`] — rooms per hotel
//! - [`categories`] — room categories per hotel
//! - [`menus`] — creator-scoped menu catalog
//! - [`payment_modes`] — creator-scoped payment modes
//! - [`stays`] — guest check-in/checkout and the running ledger
//! - [`food_orders`] — itemized food sub-ledger
//! - [`hotel_expenses`] — hotel-side expense book

pub mod auth;
pub mod categories;
pub mod food_orders;
pub mod health;
pub mod hotel_expenses;
pub mod hotels;
pub mod menus;
pub mod payment_modes;
pub mod rooms;
pub mod stays;
pub mod users;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::middleware;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public
        .merge(health::router())
        .merge(auth::router())
        // Admin API
        .merge(users::router())
        // Hotel administration and reporting
        .merge(hotels::router())
        .merge(rooms::router())
        .merge(categories::router())
        .merge(hotel_expenses::router())
        // Catalogs
        .merge(menus::router())
        .merge(payment_modes::router())
        // Guest ledger
        .merge(stays::router())
        .merge(food_orders::router())
}

/// Build a fully configured application with all middleware
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // JWT authentication - injects CurrentUser before routes run
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ))
}
