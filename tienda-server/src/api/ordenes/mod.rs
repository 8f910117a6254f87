//! Orders API module
//!
//! Public checkout plus the admin back-office routes, including the
//! verify/reject boundary over the verification engine.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/ordenes", post(handler::checkout))
        .nest("/api/admin/ordenes", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_detail).post(handler::resolve))
}
