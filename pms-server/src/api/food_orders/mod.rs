//! Food Order API module (itemized food sub-ledger)

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/stays/{id}/food-orders",
            get(handler::list_for_date).post(handler::create),
        )
        // Replace the full line set of an existing food expense
        .route("/api/food-expenses/{expense_id}", put(handler::replace))
}
