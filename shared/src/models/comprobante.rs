//! Payment Proof Model
//!
//! A comprobante is customer-submitted evidence of payment for one order.
//! An order may accumulate several proofs over time (a rejected one followed
//! by a resubmission); at most one of them ever becomes `verificado`.

use serde::{Deserialize, Serialize};

/// Proof state. `pendiente → verificado | rechazado`, terminal once resolved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComprobanteEstado {
    #[default]
    Pendiente,
    Verificado,
    Rechazado,
}

impl ComprobanteEstado {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ComprobanteEstado::Verificado | ComprobanteEstado::Rechazado
        )
    }
}

/// Payment proof view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprobanteView {
    pub id: String,
    /// Payment channel used ("transferencia", "deuna", ...)
    pub metodo_pago: String,
    pub estado: ComprobanteEstado,
    /// Opaque evidence reference (URL). Never interpreted or fetched.
    pub comprobante_url: String,
    /// Submission time, Unix millis
    pub fecha: i64,
}
