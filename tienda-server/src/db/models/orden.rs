//! Order tables: `orden` header plus `orden_item` lines

use serde::{Deserialize, Serialize};
use shared::OrdenEstado;
use surrealdb::RecordId;

/// Order header. Created at checkout in `pendiente`; mutated only by the
/// verification engine; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orden {
    pub id: Option<RecordId>,
    /// Owning customer reference (opaque to this service)
    pub usuario: String,
    pub estado: OrdenEstado,
    /// Total amount, fixed at creation
    pub total: f64,
    /// Creation time, Unix millis
    pub fecha: i64,
}

/// One order line. `cantidad` and `precio` are immutable once the order
/// exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdenItem {
    pub id: Option<RecordId>,
    pub orden: RecordId,
    /// The inventory slot this line draws from - the unit of contention
    pub inventario: RecordId,
    pub cantidad: i64,
    pub precio: f64,
}
