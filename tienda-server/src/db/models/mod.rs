//! Storage-layer models
//!
//! Structs matching the SurrealDB tables, with record links. The string-id
//! views that cross the API boundary live in `shared::models`.

pub mod comprobante;
pub mod inventario;
pub mod orden;

pub use comprobante::ComprobantePago;
pub use inventario::InventarioItem;
pub use orden::{Orden, OrdenItem};
