//! Shared types for the Tienda back-office
//!
//! Domain entities, state enums and request/response DTOs used by the
//! server and by any client tooling. Pure data, no I/O.

pub mod dto;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{ComprobanteEstado, OrdenEstado, PagoAction};
