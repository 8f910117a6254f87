//! Inventory Slot Model
//!
//! The smallest unit of stock tracking, keyed by (producto, color, talla).
//! `stock >= 0` at all times; the only mutations are the verification
//! engine's conditional decrement and the admin restock path.

use serde::{Deserialize, Serialize};

/// Inventory slot view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventarioView {
    pub id: String,
    pub producto_id: String,
    pub color: String,
    pub talla: String,
    pub stock: i64,
    /// Creation time, Unix millis
    pub created_at: i64,
}
