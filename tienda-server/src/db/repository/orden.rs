//! Order Repository
//!
//! Checkout creation and aggregate reads. All estado transitions go through
//! the verification engine, never through this repository.

use serde::{Deserialize, Serialize};
use shared::dto::CheckoutRequest;
use shared::models::{OrdenDetail, OrdenEstado, OrdenView};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::Orden;

const ORDEN_TABLE: &str = "orden";

#[derive(Deserialize)]
struct CountRow {
    total: i64,
}

/// Line parameters bound into the checkout script. Typed so `inventario`
/// crosses as a record link, not a plain object.
#[derive(Serialize)]
struct LineBind {
    inventario: surrealdb::RecordId,
    cantidad: i64,
    precio: f64,
}

#[derive(Clone)]
pub struct OrdenRepository {
    base: BaseRepository,
}

impl OrdenRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a pending order with its lines (and, when evidence was
    /// submitted at checkout, the initial pending proof) in one transaction.
    pub async fn create_checkout(&self, data: CheckoutRequest) -> RepoResult<Orden> {
        if data.items.is_empty() {
            return Err(RepoError::Validation("order has no items".into()));
        }
        if data.items.iter().any(|i| i.cantidad <= 0) {
            return Err(RepoError::Validation("cantidad must be > 0".into()));
        }
        if data.metodo_pago.is_some() != data.comprobante_url.is_some() {
            return Err(RepoError::Validation(
                "metodo_pago and comprobante_url must be provided together".into(),
            ));
        }
        let total = data
            .total()
            .ok_or_else(|| RepoError::Validation("invalid precio in items".into()))?;

        // Referenced slots must exist; stock sufficiency is NOT checked here,
        // it is the verification engine's job at payment time.
        let slot_ids: Vec<surrealdb::RecordId> = data
            .items
            .iter()
            .map(|i| record_id("inventario", &i.inventario_id))
            .collect();
        let found: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS total FROM inventario WHERE id INSIDE $ids GROUP ALL")
            .bind(("ids", slot_ids.clone()))
            .await?
            .take(0)?;
        let found = found.first().map(|c| c.total).unwrap_or(0);
        if (found as usize) < data.items.len() {
            return Err(RepoError::NotFound(
                "one or more inventory slots do not exist".into(),
            ));
        }

        // Letter prefix keeps the key a plain identifier in record-id form
        let orden_key = format!("o{}", uuid::Uuid::new_v4().simple());
        let items: Vec<LineBind> = data
            .items
            .iter()
            .zip(&slot_ids)
            .map(|(item, slot)| LineBind {
                inventario: slot.clone(),
                cantidad: item.cantidad,
                precio: item.precio,
            })
            .collect();

        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                LET $orden = CREATE ONLY type::thing('orden', $orden_key) SET
                    usuario = $usuario,
                    estado = 'pendiente',
                    total = $total,
                    fecha = $fecha;
                FOR $item IN $items {
                    CREATE orden_item SET
                        orden = $orden.id,
                        inventario = $item.inventario,
                        cantidad = $item.cantidad,
                        precio = $item.precio;
                };
                IF $metodo_pago != NONE {
                    CREATE comprobante_pago SET
                        orden = $orden.id,
                        usuario = $usuario,
                        metodo_pago = $metodo_pago,
                        estado = 'pendiente',
                        comprobante_url = $comprobante_url,
                        fecha = $fecha;
                };
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("orden_key", orden_key.clone()))
            .bind(("usuario", data.usuario.clone()))
            .bind(("total", total))
            .bind(("fecha", now_millis()))
            .bind(("items", items))
            .bind(("metodo_pago", data.metodo_pago.clone()))
            .bind(("comprobante_url", data.comprobante_url.clone()))
            .await?
            .check()?;

        self.find_by_id(&orden_key)
            .await?
            .ok_or_else(|| RepoError::Database("checkout commit left no order".into()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Orden>> {
        let orden: Option<Orden> = self.base.db().select(record_id(ORDEN_TABLE, id)).await?;
        Ok(orden)
    }

    /// Paginated admin list, newest first, optional estado filter
    pub async fn list(
        &self,
        page: usize,
        limit: usize,
        estado: Option<OrdenEstado>,
    ) -> RepoResult<(Vec<OrdenView>, i64)> {
        let filter = if estado.is_some() {
            "WHERE estado = $estado"
        } else {
            ""
        };
        let query = format!(
            "SELECT <string>id AS id, usuario, estado, total, fecha \
             FROM orden {filter} ORDER BY fecha DESC LIMIT $limit START $start"
        );
        let count_query = format!("SELECT count() AS total FROM orden {filter} GROUP ALL");
        let start = page.saturating_sub(1) * limit;

        let mut q = self
            .base
            .db()
            .query(query)
            .query(count_query)
            .bind(("limit", limit))
            .bind(("start", start));
        if let Some(estado) = estado {
            q = q.bind(("estado", estado.as_str()));
        }

        let mut result = q.await?;
        let ordenes: Vec<OrdenView> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.total).unwrap_or(0);

        Ok((ordenes, total))
    }

    /// Full aggregate in one consistent read: header, lines (with their
    /// slot's color/talla) and every proof, oldest first.
    pub async fn get_detail(&self, id: &str) -> RepoResult<OrdenDetail> {
        let mut result = self
            .base
            .db()
            .query(
                r#"
                SELECT
                    <string>id AS id,
                    usuario,
                    estado,
                    total,
                    fecha,
                    (
                        SELECT
                            <string>id AS id,
                            <string>inventario AS inventario_id,
                            inventario.color AS color,
                            inventario.talla AS talla,
                            cantidad,
                            precio
                        FROM orden_item WHERE orden = $parent.id ORDER BY id ASC
                    ) AS items,
                    (
                        SELECT
                            <string>id AS id,
                            metodo_pago,
                            estado,
                            comprobante_url,
                            fecha
                        FROM comprobante_pago WHERE orden = $parent.id ORDER BY fecha ASC
                    ) AS comprobantes
                FROM orden WHERE id = $id
                "#,
            )
            .bind(("id", record_id(ORDEN_TABLE, id)))
            .await?;

        let details: Vec<OrdenDetail> = result.take(0)?;
        details
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Orden {} not found", id)))
    }
}
