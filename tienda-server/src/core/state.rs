use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{AdminGate, StaticTokenGate};
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Shared server state - cheap to clone, handed to every handler
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | immutable configuration |
/// | db | Surreal<Db> | embedded database handle |
/// | admin_gate | Arc<dyn AdminGate> | "is this caller an administrator?" |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub admin_gate: Arc<dyn AdminGate>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, admin_gate: Arc<dyn AdminGate>) -> Self {
        Self {
            config,
            db,
            admin_gate,
        }
    }

    /// Initialize server state: open the database under `data_dir`,
    /// apply the schema, and wire the admin gate from config.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| {
            AppError::internal(format!(
                "Failed to create data directory {}: {}",
                config.data_dir, e
            ))
        })?;

        let db_path = std::path::Path::new(&config.data_dir).join("tienda.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        if config.admin_token.is_none() {
            if config.is_production() {
                return Err(AppError::internal(
                    "ADMIN_TOKEN must be set in production".to_string(),
                ));
            }
            tracing::warn!("ADMIN_TOKEN not set, all admin endpoints will refuse access");
        }
        let admin_gate: Arc<dyn AdminGate> =
            Arc::new(StaticTokenGate::new(config.admin_token.clone()));

        Ok(Self::new(config.clone(), db_service.db, admin_gate))
    }
}
