//! Payment proof handlers

use axum::{Json, extract::State};
use shared::dto::ComprobanteRequest;
use shared::models::ComprobanteView;

use crate::core::ServerState;
use crate::db::repository::ComprobanteRepository;
use crate::utils::{AppJson, AppResult};

/// POST /api/comprobante - submit (or resubmit) payment evidence for an
/// order. The evidence URL is opaque; upload happens elsewhere.
pub async fn submit(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<ComprobanteRequest>,
) -> AppResult<Json<ComprobanteView>> {
    let repo = ComprobanteRepository::new(state.db.clone());
    let proof = repo.create(payload).await?;

    Ok(Json(ComprobanteView {
        id: proof.id.map(|r| r.to_string()).unwrap_or_default(),
        metodo_pago: proof.metodo_pago,
        estado: proof.estado,
        comprobante_url: proof.comprobante_url,
        fecha: proof.fecha,
    }))
}
