//! Domain Models
//!
//! Entity views and state enums. The server keeps its own storage-layer
//! structs (with record links); these are the string-id views that cross
//! the API boundary.

pub mod comprobante;
pub mod inventario;
pub mod orden;

pub use comprobante::{ComprobanteEstado, ComprobanteView};
pub use inventario::InventarioView;
pub use orden::{OrdenDetail, OrdenEstado, OrdenItemView, OrdenView, PagoAction};
