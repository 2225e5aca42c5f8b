//! Hotel API module

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/hotels", routes())
}

// Segment parameter is {hotel_id} everywhere under /api/hotels so the
// nested rooms/categories/expenses/stays routers share the same node.
fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{hotel_id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        // Manager assignment (status flip, never row deletion)
        .route(
            "/{hotel_id}/managers",
            get(handler::list_managers).post(handler::assign_manager),
        )
        .route(
            "/{hotel_id}/managers/{manager_id}",
            delete(handler::revoke_manager),
        )
        // Hotel-day rollup
        .route("/{hotel_id}/day-report", get(handler::day_report))
}
