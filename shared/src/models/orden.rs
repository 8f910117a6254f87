//! Order Model
//!
//! State machine: `pendiente → pagado` (verify) or `pendiente → rechazado`
//! (reject). Both outcomes are terminal for the payment workflow; a failed
//! stock check does NOT transition the order.

use serde::{Deserialize, Serialize};

use super::comprobante::ComprobanteView;

/// Order state. Stored and serialized as Spanish lowercase ("pendiente", ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrdenEstado {
    #[default]
    Pendiente,
    Pagado,
    Rechazado,
}

impl OrdenEstado {
    /// Terminal states cannot be resolved again
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrdenEstado::Pagado | OrdenEstado::Rechazado)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrdenEstado::Pendiente => "pendiente",
            OrdenEstado::Pagado => "pagado",
            OrdenEstado::Rechazado => "rechazado",
        }
    }
}

impl std::fmt::Display for OrdenEstado {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin action on a pending payment proof
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PagoAction {
    Verify,
    Reject,
}

/// Order header view (admin list)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdenView {
    pub id: String,
    pub usuario: String,
    pub estado: OrdenEstado,
    /// Total amount, fixed at checkout
    pub total: f64,
    /// Creation time, Unix millis
    pub fecha: i64,
}

/// One order line: an inventory slot plus the requested quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdenItemView {
    pub id: String,
    pub inventario_id: String,
    pub color: String,
    pub talla: String,
    pub cantidad: i64,
    /// Unit price snapshot, fixed at checkout
    pub precio: f64,
}

/// Full order aggregate (admin detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdenDetail {
    pub id: String,
    pub usuario: String,
    pub estado: OrdenEstado,
    pub total: f64,
    pub fecha: i64,
    pub items: Vec<OrdenItemView>,
    pub comprobantes: Vec<ComprobanteView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_serializes_to_spanish_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrdenEstado::Pendiente).unwrap(),
            "\"pendiente\""
        );
        assert_eq!(
            serde_json::to_string(&OrdenEstado::Pagado).unwrap(),
            "\"pagado\""
        );
        let parsed: OrdenEstado = serde_json::from_str("\"rechazado\"").unwrap();
        assert_eq!(parsed, OrdenEstado::Rechazado);
    }

    #[test]
    fn terminal_states() {
        assert!(!OrdenEstado::Pendiente.is_terminal());
        assert!(OrdenEstado::Pagado.is_terminal());
        assert!(OrdenEstado::Rechazado.is_terminal());
    }

    #[test]
    fn action_parses_from_request_body() {
        let verify: PagoAction = serde_json::from_str("\"verify\"").unwrap();
        assert_eq!(verify, PagoAction::Verify);
        assert!(serde_json::from_str::<PagoAction>("\"approve\"").is_err());
    }
}
