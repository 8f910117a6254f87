//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`ordenes`] - checkout, admin order list/detail, payment resolution
//! - [`comprobantes`] - payment proof submission
//! - [`inventario`] - admin inventory CRUD, public stock reads

pub mod comprobantes;
pub mod health;
pub mod inventario;
pub mod ordenes;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(ordenes::router())
        .merge(comprobantes::router())
        .merge(inventario::router())
}
