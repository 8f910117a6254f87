//! Inventory API module
//!
//! Admin slot management plus the public availability read used by
//! product pages.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/stock/{producto_id}", get(handler::stock_by_producto))
        .nest("/api/admin/inventario", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", patch(handler::update).delete(handler::remove))
}
