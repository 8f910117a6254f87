//! Payment proof table: `comprobante_pago`

use serde::{Deserialize, Serialize};
use shared::ComprobanteEstado;
use surrealdb::RecordId;

/// Payment proof record. Many-to-one with `orden` - resubmission after a
/// rejection creates a new row rather than reusing the old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprobantePago {
    pub id: Option<RecordId>,
    pub orden: RecordId,
    pub usuario: String,
    pub metodo_pago: String,
    pub estado: ComprobanteEstado,
    /// Opaque evidence URL; never interpreted or fetched by this service
    pub comprobante_url: String,
    /// Submission time, Unix millis
    pub fecha: i64,
}
