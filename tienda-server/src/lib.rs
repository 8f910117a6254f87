//! Tienda Back-Office Server
//!
//! Storefront back-office: embedded database, payment verification and
//! inventory reconciliation behind a thin HTTP boundary.
//!
//! # Módulos
//!
//! - **db**: embedded SurrealDB storage, models and repositories
//! - **verification**: the payment-verification engine (atomic
//!   proof/order/stock transition under concurrency)
//! - **api**: HTTP routes and handlers (admin back-office + public reads)
//! - **auth**: admin gate (the surrounding system owns real identity)
//!
//! # Estructura
//!
//! ```text
//! tienda-server/src/
//! ├── core/          # configuración, estado, servidor
//! ├── auth/          # admin gate + extractor
//! ├── api/           # rutas HTTP y handlers
//! ├── db/            # capa de datos (modelos + repositorios)
//! ├── verification/  # motor de verificación de pagos
//! └── utils/         # errores, logger
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;
pub mod verification;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::{AppError, AppResult};
pub use verification::{PaymentError, VerificationEngine};

// Re-export logger functions
pub use utils::logger::{LogFormat, init_logger, init_logger_with_file};
