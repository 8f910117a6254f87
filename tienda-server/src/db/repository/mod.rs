//! Repository Module
//!
//! Data access for the SurrealDB tables. Repositories hold no business
//! logic beyond their atomicity contracts; the payment state machine lives
//! in `crate::verification`.

pub mod comprobante;
pub mod inventario;
pub mod orden;

// Re-exports
pub use comprobante::ComprobanteRepository;
pub use inventario::InventarioRepository;
pub use orden::OrdenRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // UNIQUE index violations surface as plain database errors
        if msg.contains("already contains") || msg.to_lowercase().contains("unique") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for crate::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => crate::AppError::NotFound(msg),
            RepoError::Duplicate(msg) | RepoError::Conflict(msg) => crate::AppError::Conflict(msg),
            RepoError::Validation(msg) => crate::AppError::Validation(msg),
            RepoError::Database(msg) => crate::AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: the API accepts both "table:key" and bare "key" forms
// =============================================================================

/// Build a RecordId for `table`, tolerating an already-prefixed id string
/// and the ⟨⟩ escaping RecordId's Display adds around non-ident keys
pub fn record_id(table: &str, id: &str) -> RecordId {
    let key = id
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
        .trim_start_matches('⟨')
        .trim_end_matches('⟩');
    RecordId::from_table_key(table, key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
