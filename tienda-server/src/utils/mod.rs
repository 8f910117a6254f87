//! Utility module - errors, logging, results
//!
//! - [`AppError`] - application error type
//! - [`AppResponse`] - API response envelope
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, AppJson, AppResponse};
pub use result::AppResult;
