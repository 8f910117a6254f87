//! Order API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::dto::{
    CheckoutRequest, CheckoutResponse, ListMeta, Paginated, ResolverPagoRequest,
    ResolverPagoResponse,
};
use shared::models::{OrdenDetail, OrdenEstado, OrdenView, PagoAction};

use crate::auth::AdminCaller;
use crate::core::ServerState;
use crate::db::repository::OrdenRepository;
use crate::utils::{AppJson, AppResult};
use crate::verification::VerificationEngine;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub estado: Option<OrdenEstado>,
}

/// POST /api/ordenes - checkout: create a pending order with its lines
/// (and the initial proof when evidence is attached)
pub async fn checkout(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let repo = OrdenRepository::new(state.db.clone());
    let orden = repo.create_checkout(payload).await?;

    let orden_id = orden.id.map(|r| r.to_string()).unwrap_or_default();
    tracing::info!(orden = %orden_id, total = orden.total, "checkout created");

    Ok(Json(CheckoutResponse {
        orden_id,
        estado: orden.estado,
        total: orden.total,
    }))
}

/// GET /api/admin/ordenes - paginated list, newest first
pub async fn list(
    State(state): State<ServerState>,
    _admin: AdminCaller,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Paginated<OrdenView>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let repo = OrdenRepository::new(state.db.clone());
    let (data, total) = repo.list(page, limit, query.estado).await?;

    Ok(Json(Paginated {
        data,
        meta: ListMeta { total, page, limit },
    }))
}

/// GET /api/admin/ordenes/{id} - full aggregate: header, lines, proofs
pub async fn get_detail(
    State(state): State<ServerState>,
    _admin: AdminCaller,
    Path(id): Path<String>,
) -> AppResult<Json<OrdenDetail>> {
    let repo = OrdenRepository::new(state.db.clone());
    let detail = repo.get_detail(&id).await?;
    Ok(Json(detail))
}

/// POST /api/admin/ordenes/{id} - verify or reject a pending payment proof
///
/// The caller's administrative privilege is proven by [`AdminCaller`]
/// before this body runs; the engine itself never consults session state.
pub async fn resolve(
    State(state): State<ServerState>,
    _admin: AdminCaller,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ResolverPagoRequest>,
) -> AppResult<Json<ResolverPagoResponse>> {
    let engine = VerificationEngine::new(state.db.clone());
    let resolved = engine
        .resolve_payment(&id, &payload.comprobante_id, payload.action)
        .await?;

    let message = match payload.action {
        PagoAction::Verify => "Pago verificado y stock actualizado",
        PagoAction::Reject => "Pago rechazado",
    };

    Ok(Json(ResolverPagoResponse {
        orden_id: resolved.orden_id,
        estado: resolved.estado,
        message: message.to_string(),
    }))
}
