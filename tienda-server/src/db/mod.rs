//! Database Module
//!
//! Embedded SurrealDB storage: connection handling and schema definition.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NS: &str = "tienda";
const DB: &str = "tienda";

/// Database service - owns the embedded database handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::init(db).await
    }

    /// In-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NS)
            .use_db(DB)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;
        tracing::info!("Database ready (ns={}, db={})", NS, DB);

        Ok(Self { db })
    }
}

/// Apply the schema idempotently
///
/// The `stock >= 0` field assertion is a backstop; the real over-sell guard
/// is the conditional decrement in the verification engine.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS inventario SCHEMAFULL;
        DEFINE FIELD IF NOT EXISTS producto ON inventario TYPE record<producto>;
        DEFINE FIELD IF NOT EXISTS color ON inventario TYPE string;
        DEFINE FIELD IF NOT EXISTS talla ON inventario TYPE string;
        DEFINE FIELD IF NOT EXISTS stock ON inventario TYPE int ASSERT $value >= 0;
        DEFINE FIELD IF NOT EXISTS created_at ON inventario TYPE int;
        DEFINE INDEX IF NOT EXISTS inventario_slot ON inventario FIELDS producto, color, talla UNIQUE;

        DEFINE TABLE IF NOT EXISTS orden SCHEMAFULL;
        DEFINE FIELD IF NOT EXISTS usuario ON orden TYPE string;
        DEFINE FIELD IF NOT EXISTS estado ON orden TYPE string
            ASSERT $value INSIDE ['pendiente', 'pagado', 'rechazado'];
        DEFINE FIELD IF NOT EXISTS total ON orden TYPE number;
        DEFINE FIELD IF NOT EXISTS fecha ON orden TYPE int;

        DEFINE TABLE IF NOT EXISTS orden_item SCHEMAFULL;
        DEFINE FIELD IF NOT EXISTS orden ON orden_item TYPE record<orden>;
        DEFINE FIELD IF NOT EXISTS inventario ON orden_item TYPE record<inventario>;
        DEFINE FIELD IF NOT EXISTS cantidad ON orden_item TYPE int ASSERT $value > 0;
        DEFINE FIELD IF NOT EXISTS precio ON orden_item TYPE number;

        DEFINE TABLE IF NOT EXISTS comprobante_pago SCHEMAFULL;
        DEFINE FIELD IF NOT EXISTS orden ON comprobante_pago TYPE record<orden>;
        DEFINE FIELD IF NOT EXISTS usuario ON comprobante_pago TYPE string;
        DEFINE FIELD IF NOT EXISTS metodo_pago ON comprobante_pago TYPE string;
        DEFINE FIELD IF NOT EXISTS estado ON comprobante_pago TYPE string
            ASSERT $value INSIDE ['pendiente', 'verificado', 'rechazado'];
        DEFINE FIELD IF NOT EXISTS comprobante_url ON comprobante_pago TYPE string;
        DEFINE FIELD IF NOT EXISTS fecha ON comprobante_pago TYPE int;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;

    Ok(())
}
