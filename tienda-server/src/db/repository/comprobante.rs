//! Payment Proof Repository
//!
//! Proof submission and reads. Resolution (verificado/rechazado) is the
//! verification engine's job.

use shared::dto::ComprobanteRequest;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::ComprobantePago;

const COMPROBANTE_TABLE: &str = "comprobante_pago";

#[derive(Clone)]
pub struct ComprobanteRepository {
    base: BaseRepository,
}

impl ComprobanteRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Submit payment evidence for an order.
    ///
    /// Resubmission after a rejection is supported: when the order sits in
    /// `rechazado`, the same transaction that inserts the new pending proof
    /// returns the order to `pendiente`. A `pagado` order accepts no
    /// further proofs.
    pub async fn create(&self, data: ComprobanteRequest) -> RepoResult<ComprobantePago> {
        if data.comprobante_url.trim().is_empty() {
            return Err(RepoError::Validation("comprobante_url is required".into()));
        }
        if data.metodo_pago.trim().is_empty() {
            return Err(RepoError::Validation("metodo_pago is required".into()));
        }

        let key = format!("c{}", uuid::Uuid::new_v4().simple());
        let result = self
            .base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                LET $o = (SELECT * FROM $orden)[0];
                IF $o == NONE { THROW 'E_NOT_FOUND' };
                IF $o.estado == 'pagado' { THROW 'E_ALREADY_RESOLVED' };
                IF $o.estado == 'rechazado' {
                    UPDATE $orden SET estado = 'pendiente';
                };
                CREATE ONLY type::thing('comprobante_pago', $key) SET
                    orden = $orden,
                    usuario = $usuario,
                    metodo_pago = $metodo_pago,
                    estado = 'pendiente',
                    comprobante_url = $comprobante_url,
                    fecha = $fecha;
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("orden", record_id("orden", &data.orden_id)))
            .bind(("key", key.clone()))
            .bind(("usuario", data.usuario))
            .bind(("metodo_pago", data.metodo_pago))
            .bind(("comprobante_url", data.comprobante_url))
            .bind(("fecha", now_millis()))
            .await?
            .check();

        if let Err(e) = result {
            let msg = e.to_string();
            if msg.contains("E_NOT_FOUND") {
                return Err(RepoError::NotFound(format!(
                    "Orden {} not found",
                    data.orden_id
                )));
            }
            if msg.contains("E_ALREADY_RESOLVED") {
                return Err(RepoError::Validation(
                    "orden is already paid; no further proofs accepted".into(),
                ));
            }
            return Err(e.into());
        }

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("proof commit left no record".into()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ComprobantePago>> {
        let proof: Option<ComprobantePago> = self
            .base
            .db()
            .select(record_id(COMPROBANTE_TABLE, id))
            .await?;
        Ok(proof)
    }

    /// Proof history for one order, oldest first
    pub async fn list_by_orden(&self, orden_id: &str) -> RepoResult<Vec<ComprobantePago>> {
        let proofs: Vec<ComprobantePago> = self
            .base
            .db()
            .query("SELECT * FROM comprobante_pago WHERE orden = $orden ORDER BY fecha ASC")
            .bind(("orden", record_id("orden", orden_id)))
            .await?
            .take(0)?;
        Ok(proofs)
    }
}
