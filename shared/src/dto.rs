//! Request/Response DTOs for the HTTP boundary

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::models::{OrdenEstado, PagoAction};

// =============================================================================
// Payment resolution (the core boundary)
// =============================================================================

/// POST /api/admin/ordenes/{id} - verify or reject a pending payment proof
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverPagoRequest {
    pub action: PagoAction,
    pub comprobante_id: String,
}

/// Outcome of a resolved payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverPagoResponse {
    pub orden_id: String,
    pub estado: OrdenEstado,
    pub message: String,
}

// =============================================================================
// Checkout / proof submission (out-of-core collaborators)
// =============================================================================

/// One cart line at checkout. `precio` is the unit-price snapshot supplied
/// by the catalog collaborator; it is immutable once the order exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutItemInput {
    pub inventario_id: String,
    pub cantidad: i64,
    pub precio: f64,
}

/// POST /api/ordenes - create a pending order with its lines and,
/// optionally, an initial pending proof
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub usuario: String,
    pub items: Vec<CheckoutItemInput>,
    #[serde(default)]
    pub metodo_pago: Option<String>,
    #[serde(default)]
    pub comprobante_url: Option<String>,
}

impl CheckoutRequest {
    /// Order total: sum of cantidad × precio per line, computed in decimal
    /// to avoid float accumulation, rounded to cents.
    pub fn total(&self) -> Option<f64> {
        let mut total = Decimal::ZERO;
        for item in &self.items {
            let precio = Decimal::from_f64(item.precio)?;
            total += precio * Decimal::from(item.cantidad);
        }
        total.round_dp(2).to_f64()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub orden_id: String,
    pub estado: OrdenEstado,
    pub total: f64,
}

/// POST /api/comprobante - submit (or resubmit) payment evidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprobanteRequest {
    pub orden_id: String,
    pub usuario: String,
    pub metodo_pago: String,
    pub comprobante_url: String,
}

// =============================================================================
// Inventory administration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventarioCreate {
    pub producto_id: String,
    pub color: String,
    pub talla: String,
    pub stock: i64,
}

/// PATCH payload; only whitelisted fields, stock must stay non-negative
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventarioUpdate {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub talla: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
}

// =============================================================================
// Pagination
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMeta {
    pub total: i64,
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_total_is_exact() {
        let req = CheckoutRequest {
            usuario: "usuario:u1".into(),
            items: vec![
                CheckoutItemInput {
                    inventario_id: "inv1".into(),
                    cantidad: 3,
                    precio: 0.1,
                },
                CheckoutItemInput {
                    inventario_id: "inv2".into(),
                    cantidad: 1,
                    precio: 19.99,
                },
            ],
            metodo_pago: None,
            comprobante_url: None,
        };
        // 0.1 * 3 would be 0.30000000000000004 in f64 arithmetic
        assert_eq!(req.total(), Some(20.29));
    }

    #[test]
    fn checkout_total_empty_cart_is_zero() {
        let req = CheckoutRequest {
            usuario: "usuario:u1".into(),
            items: vec![],
            metodo_pago: None,
            comprobante_url: None,
        };
        assert_eq!(req.total(), Some(0.0));
    }
}
