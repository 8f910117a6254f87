//! Inventory table: `inventario`

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Per-(producto, color, talla) stock counter. The schema asserts
/// `stock >= 0`; decrements happen only through the conditional-decrement
/// primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventarioItem {
    pub id: Option<RecordId>,
    /// Catalog reference (the catalog itself is another service's concern)
    pub producto: RecordId,
    pub color: String,
    pub talla: String,
    pub stock: i64,
    /// Creation time, Unix millis
    pub created_at: i64,
}
