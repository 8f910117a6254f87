//! The verification state machine and its transaction scripts.
//!
//! Strategy: one database transaction built from conditional
//! UPDATE-with-predicate statements (compare-and-decrement), never
//! read-then-write. Every mutation is guarded by the state it expects
//! (`estado = 'pendiente'`, `stock >= cantidad`); a failed guard throws and
//! rolls the whole transaction back. This keeps the transaction to a single
//! round trip and makes a retry after an optimistic-concurrency abort safe:
//! whatever a competing transaction committed in between, the guards
//! re-evaluate against the new state instead of double-applying.

use std::time::Duration;

use shared::models::{OrdenEstado, PagoAction};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use crate::db::models::{ComprobantePago, Orden};
use crate::db::repository::record_id;

/// Retry budget for optimistic-transaction aborts. Business outcomes
/// (insufficient stock, already resolved) are never retried.
const MAX_ATTEMPTS: u32 = 8;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(5);

// Markers thrown inside the transaction scripts; a THROW cancels the
// transaction, so observing a marker implies nothing was written.
const ERR_ALREADY_RESOLVED: &str = "E_ALREADY_RESOLVED";
const ERR_INSUFFICIENT_STOCK: &str = "E_STOCK_INSUFICIENTE";

/// Verify: flip the order and the proof out of `pendiente`, then decrement
/// each line's slot only where enough stock remains. Lines are processed in
/// ascending record-id order so two orders sharing slots touch them in the
/// same sequence.
const VERIFY_SCRIPT: &str = r#"
    BEGIN TRANSACTION;
    LET $o = UPDATE $orden SET estado = 'pagado' WHERE estado = 'pendiente' RETURN AFTER;
    IF array::len($o) == 0 { THROW 'E_ALREADY_RESOLVED' };
    LET $c = UPDATE $comprobante SET estado = 'verificado'
        WHERE estado = 'pendiente' AND orden = $orden RETURN AFTER;
    IF array::len($c) == 0 { THROW 'E_ALREADY_RESOLVED' };
    FOR $item IN (SELECT * FROM orden_item WHERE orden = $orden ORDER BY id ASC) {
        LET $hit = UPDATE $item.inventario SET stock -= $item.cantidad
            WHERE stock >= $item.cantidad RETURN AFTER;
        IF array::len($hit) == 0 { THROW 'E_STOCK_INSUFICIENTE' };
    };
    COMMIT TRANSACTION;
"#;

/// Reject: no inventory effect, both rows guarded on `pendiente`.
const REJECT_SCRIPT: &str = r#"
    BEGIN TRANSACTION;
    LET $c = UPDATE $comprobante SET estado = 'rechazado'
        WHERE estado = 'pendiente' AND orden = $orden RETURN AFTER;
    IF array::len($c) == 0 { THROW 'E_ALREADY_RESOLVED' };
    LET $o = UPDATE $orden SET estado = 'rechazado' WHERE estado = 'pendiente' RETURN AFTER;
    IF array::len($o) == 0 { THROW 'E_ALREADY_RESOLVED' };
    COMMIT TRANSACTION;
"#;

/// Structured outcomes of `resolve_payment`. Everything an admin action can
/// run into is a variant here; nothing escapes as an unclassified panic.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Unknown order or proof id - rejected before any transaction starts
    #[error("Not found: {0}")]
    NotFound(String),

    /// The proof exists but belongs to a different order
    #[error("Comprobante does not belong to the given orden")]
    ProofMismatch,

    /// Order or proof already left `pendiente`; no mutation performed
    #[error("Orden or comprobante already resolved")]
    AlreadyResolved,

    /// Some line's requested cantidad exceeds its slot's stock; the whole
    /// transaction rolled back, order and proof remain `pendiente`
    #[error("Stock insuficiente")]
    InsufficientStock,

    /// Transaction kept aborting on write conflicts; safe to retry
    #[error("Transaction conflict, retry: {0}")]
    Conflict(String),

    /// Storage failure; transaction rolled back
    #[error("Database error: {0}")]
    Database(String),
}

impl From<PaymentError> for crate::AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::NotFound(msg) => crate::AppError::NotFound(msg),
            PaymentError::ProofMismatch => crate::AppError::Invalid(
                "comprobante does not belong to the given orden".to_string(),
            ),
            PaymentError::AlreadyResolved => crate::AppError::AlreadyResolved(
                "orden already processed by another administrator".to_string(),
            ),
            PaymentError::InsufficientStock => crate::AppError::InsufficientStock(
                "stock insuficiente para completar la orden".to_string(),
            ),
            PaymentError::Conflict(msg) | PaymentError::Database(msg) => {
                crate::AppError::Database(msg)
            }
        }
    }
}

/// Result of a successfully resolved payment
#[derive(Debug, Clone)]
pub struct ResolvedPayment {
    pub orden_id: String,
    pub estado: OrdenEstado,
}

/// The verification engine. Holds only a database handle; the acting
/// administrator is authorized by the request boundary before this is
/// ever called - no ambient session state is read here.
#[derive(Clone)]
pub struct VerificationEngine {
    db: Surreal<Db>,
}

impl VerificationEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Resolve a pending payment proof.
    ///
    /// Validation (unknown ids, proof/order mismatch, already-terminal
    /// states) happens before any transaction. The transition itself is a
    /// single atomic script; on any failure the order, the proof and every
    /// inventory slot are left exactly as they were.
    pub async fn resolve_payment(
        &self,
        orden_id: &str,
        comprobante_id: &str,
        action: PagoAction,
    ) -> Result<ResolvedPayment, PaymentError> {
        let orden_rid = record_id("orden", orden_id);
        let comprobante_rid = record_id("comprobante_pago", comprobante_id);

        let orden = self.load_orden(&orden_rid).await?;
        let proof = self.load_comprobante(&comprobante_rid).await?;

        if proof.orden != orden_rid {
            return Err(PaymentError::ProofMismatch);
        }
        // Pre-checks give precise errors without a write attempt; the
        // scripts re-check both states inside the transaction, so a racing
        // resolver is still caught.
        if orden.estado.is_terminal() || proof.estado.is_terminal() {
            return Err(PaymentError::AlreadyResolved);
        }

        let (script, estado) = match action {
            PagoAction::Verify => (VERIFY_SCRIPT, OrdenEstado::Pagado),
            PagoAction::Reject => (REJECT_SCRIPT, OrdenEstado::Rechazado),
        };

        self.run_resolution(script, &orden_rid, &comprobante_rid)
            .await?;

        tracing::info!(
            orden = %orden_rid,
            comprobante = %comprobante_rid,
            estado = %estado,
            "payment resolved"
        );

        Ok(ResolvedPayment {
            orden_id: orden_rid.to_string(),
            estado,
        })
    }

    async fn load_orden(&self, rid: &RecordId) -> Result<Orden, PaymentError> {
        let orden: Option<Orden> = self
            .db
            .select(rid.clone())
            .await
            .map_err(|e| PaymentError::Database(e.to_string()))?;
        orden.ok_or_else(|| PaymentError::NotFound(format!("Orden {} not found", rid)))
    }

    async fn load_comprobante(&self, rid: &RecordId) -> Result<ComprobantePago, PaymentError> {
        let proof: Option<ComprobantePago> = self
            .db
            .select(rid.clone())
            .await
            .map_err(|e| PaymentError::Database(e.to_string()))?;
        proof.ok_or_else(|| PaymentError::NotFound(format!("Comprobante {} not found", rid)))
    }

    /// Execute one resolution script, retrying only on optimistic
    /// transaction aborts.
    async fn run_resolution(
        &self,
        script: &str,
        orden: &RecordId,
        comprobante: &RecordId,
    ) -> Result<(), PaymentError> {
        let mut attempt = 1;
        loop {
            let result = self
                .db
                .query(script)
                .bind(("orden", orden.clone()))
                .bind(("comprobante", comprobante.clone()))
                .await;

            let err = match result {
                Ok(response) => match response.check() {
                    Ok(_) => return Ok(()),
                    Err(e) => e,
                },
                Err(e) => e,
            };

            match classify(&err) {
                ScriptOutcome::AlreadyResolved => return Err(PaymentError::AlreadyResolved),
                ScriptOutcome::InsufficientStock => return Err(PaymentError::InsufficientStock),
                ScriptOutcome::Conflict if attempt < MAX_ATTEMPTS => {
                    tracing::debug!(attempt, error = %err, "transaction conflict, retrying");
                    tokio::time::sleep(RETRY_BASE_DELAY * attempt).await;
                    attempt += 1;
                }
                ScriptOutcome::Conflict => return Err(PaymentError::Conflict(err.to_string())),
                ScriptOutcome::Other => return Err(PaymentError::Database(err.to_string())),
            }
        }
    }
}

enum ScriptOutcome {
    AlreadyResolved,
    InsufficientStock,
    Conflict,
    Other,
}

/// Map a script error back to an outcome. THROW markers arrive embedded in
/// the error message; anything that looks like an optimistic-concurrency
/// abort is retryable.
fn classify(err: &surrealdb::Error) -> ScriptOutcome {
    let msg = err.to_string();
    if msg.contains(ERR_ALREADY_RESOLVED) {
        return ScriptOutcome::AlreadyResolved;
    }
    if msg.contains(ERR_INSUFFICIENT_STOCK) {
        return ScriptOutcome::InsufficientStock;
    }
    let lower = msg.to_lowercase();
    if lower.contains("can be retried")
        || lower.contains("read or write conflict")
        || lower.contains("failed to commit")
        || (lower.contains("transaction") && lower.contains("conflict"))
    {
        return ScriptOutcome::Conflict;
    }
    ScriptOutcome::Other
}
