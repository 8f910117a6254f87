//! Admin gate
//!
//! The verification workflow never reads ambient session state. Real
//! identity management lives in an external collaborator; this module only
//! answers "is this caller an administrator?" from the bearer token and
//! hands handlers a pre-checked [`AdminCaller`].

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::AppError;
use crate::core::ServerState;

/// Authorization decision for admin endpoints
pub trait AdminGate: Send + Sync {
    /// Whether the presented bearer token belongs to an administrator
    fn is_admin(&self, token: &str) -> bool;
}

/// Gate backed by a single configured token
///
/// With no token configured the gate refuses everyone; it never falls back
/// to open access.
pub struct StaticTokenGate {
    token: Option<String>,
}

impl StaticTokenGate {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl AdminGate for StaticTokenGate {
    fn is_admin(&self, token: &str) -> bool {
        match &self.token {
            Some(expected) => token == expected,
            None => false,
        }
    }
}

/// Extractor proving the caller passed the admin gate
///
/// Admin handlers take an `AdminCaller` argument; extraction fails with
/// 401 (no credentials) or 403 (credentials refused) before the handler
/// body runs.
#[derive(Debug, Clone)]
pub struct AdminCaller;

impl FromRequestParts<ServerState> for AdminCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => token,
            None => {
                tracing::warn!(target: "security", uri = %parts.uri, "admin call without credentials");
                return Err(AppError::Unauthorized);
            }
        };

        if !state.admin_gate.is_admin(token) {
            tracing::warn!(target: "security", uri = %parts.uri, "admin call with refused credentials");
            return Err(AppError::forbidden("Administrator privilege required"));
        }

        Ok(AdminCaller)
    }
}
