//! Guest Stay API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/stays", routes())
        // Stay list lives under the hotel it belongs to
        .route("/api/hotels/{hotel_id}/stays", get(handler::list_by_hotel))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/checkout", post(handler::checkout))
        // Merged payment/expense recording
        .route("/{id}/ledger", post(handler::record_ledger))
        .route("/{id}/pending", get(handler::pending))
}
