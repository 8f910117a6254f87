//! Inventory API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::dto::{InventarioCreate, InventarioUpdate, ListMeta, Paginated};
use shared::models::InventarioView;

use crate::auth::AdminCaller;
use crate::core::ServerState;
use crate::db::repository::InventarioRepository;
use crate::utils::{AppJson, AppResult};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub sort_by: Option<String>,
    /// "asc" or "desc" (default)
    #[serde(default)]
    pub order: Option<String>,
}

/// GET /api/admin/inventario - paginated, sortable slot list
pub async fn list(
    State(state): State<ServerState>,
    _admin: AdminCaller,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Paginated<InventarioView>>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let ascending = query.order.as_deref() == Some("asc");

    let repo = InventarioRepository::new(state.db.clone());
    let (data, total) = repo
        .list(page, limit, query.sort_by.as_deref(), ascending)
        .await?;

    Ok(Json(Paginated {
        data,
        meta: ListMeta { total, page, limit },
    }))
}

/// POST /api/admin/inventario - define a new product variant slot
pub async fn create(
    State(state): State<ServerState>,
    _admin: AdminCaller,
    AppJson(payload): AppJson<InventarioCreate>,
) -> AppResult<Json<InventarioView>> {
    let repo = InventarioRepository::new(state.db.clone());
    let item = repo.create(payload).await?;

    Ok(Json(to_view(item)))
}

/// PATCH /api/admin/inventario/{id} - restock / field correction.
/// This is the administrative stock path; sold stock only ever moves
/// through the verification engine.
pub async fn update(
    State(state): State<ServerState>,
    _admin: AdminCaller,
    Path(id): Path<String>,
    AppJson(payload): AppJson<InventarioUpdate>,
) -> AppResult<Json<InventarioView>> {
    let repo = InventarioRepository::new(state.db.clone());
    let item = repo.update_fields(&id, payload).await?;

    Ok(Json(to_view(item)))
}

/// DELETE /api/admin/inventario/{id} - remove a slot no order line
/// references (409 while anything does)
pub async fn remove(
    State(state): State<ServerState>,
    _admin: AdminCaller,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = InventarioRepository::new(state.db.clone());
    repo.delete(&id).await?;

    Ok(Json(serde_json::json!({ "message": "Inventario eliminado" })))
}

/// GET /api/stock/{producto_id} - public availability read (slots with
/// stock on hand for one product)
pub async fn stock_by_producto(
    State(state): State<ServerState>,
    Path(producto_id): Path<String>,
) -> AppResult<Json<Vec<InventarioView>>> {
    let repo = InventarioRepository::new(state.db.clone());
    let slots = repo.find_available_by_producto(&producto_id).await?;
    Ok(Json(slots))
}

fn to_view(item: crate::db::models::InventarioItem) -> InventarioView {
    InventarioView {
        id: item.id.map(|r| r.to_string()).unwrap_or_default(),
        producto_id: item.producto.to_string(),
        color: item.color,
        talla: item.talla,
        stock: item.stock,
        created_at: item.created_at,
    }
}
