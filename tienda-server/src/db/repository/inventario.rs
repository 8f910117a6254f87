//! Inventory Repository
//!
//! Ledger access. The one contract that matters here is
//! [`InventarioRepository::try_decrement`]: a single conditional
//! UPDATE-with-predicate, so no caller ever does read-then-write on stock.

use serde::Deserialize;
use shared::dto::{InventarioCreate, InventarioUpdate};
use shared::models::InventarioView;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::InventarioItem;

const INVENTARIO_TABLE: &str = "inventario";

/// Sort fields accepted by the admin list endpoint
const ALLOWED_SORT: &[&str] = &["created_at", "stock", "color", "talla"];

#[derive(Deserialize)]
struct CountRow {
    total: i64,
}

#[derive(Clone)]
pub struct InventarioRepository {
    base: BaseRepository,
}

impl InventarioRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create an inventory slot. (producto, color, talla) is unique.
    pub async fn create(&self, data: InventarioCreate) -> RepoResult<InventarioItem> {
        if data.stock < 0 {
            return Err(RepoError::Validation("stock must be >= 0".into()));
        }
        if data.color.trim().is_empty() || data.talla.trim().is_empty() {
            return Err(RepoError::Validation("color and talla are required".into()));
        }

        let item = InventarioItem {
            id: None,
            producto: record_id("producto", &data.producto_id),
            color: data.color,
            talla: data.talla,
            stock: data.stock,
            created_at: now_millis(),
        };

        let created: Option<InventarioItem> = self
            .base
            .db()
            .create(INVENTARIO_TABLE)
            .content(item)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create inventory slot".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<InventarioItem>> {
        let item: Option<InventarioItem> = self
            .base
            .db()
            .select(record_id(INVENTARIO_TABLE, id))
            .await?;
        Ok(item)
    }

    /// Paginated admin list, sortable by whitelisted fields
    pub async fn list(
        &self,
        page: usize,
        limit: usize,
        sort_by: Option<&str>,
        ascending: bool,
    ) -> RepoResult<(Vec<InventarioView>, i64)> {
        let sort = match sort_by {
            Some(field) if ALLOWED_SORT.contains(&field) => field,
            Some(field) => {
                return Err(RepoError::Validation(format!(
                    "Unsupported sort field: {field}"
                )));
            }
            None => "created_at",
        };
        let direction = if ascending { "ASC" } else { "DESC" };
        let start = page.saturating_sub(1) * limit;

        // Sort field and direction are whitelisted above; only values are bound
        let query = format!(
            "SELECT <string>id AS id, <string>producto AS producto_id, color, talla, stock, created_at \
             FROM inventario ORDER BY {sort} {direction} LIMIT $limit START $start"
        );

        let mut result = self
            .base
            .db()
            .query(query)
            .query("SELECT count() AS total FROM inventario GROUP ALL")
            .bind(("limit", limit))
            .bind(("start", start))
            .await?;

        let items: Vec<InventarioView> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.total).unwrap_or(0);

        Ok((items, total))
    }

    /// Slots with stock on hand for one product (product-page availability)
    pub async fn find_available_by_producto(
        &self,
        producto_id: &str,
    ) -> RepoResult<Vec<InventarioView>> {
        let items: Vec<InventarioView> = self
            .base
            .db()
            .query(
                "SELECT <string>id AS id, <string>producto AS producto_id, color, talla, stock, created_at \
                 FROM inventario WHERE producto = $producto AND stock > 0 ORDER BY talla",
            )
            .bind(("producto", record_id("producto", producto_id)))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Admin restock / correction path. Whitelisted fields only; stock is
    /// an absolute overwrite and must stay non-negative. This path never
    /// touches orders and never runs inside the verification engine.
    pub async fn update_fields(
        &self,
        id: &str,
        data: InventarioUpdate,
    ) -> RepoResult<InventarioItem> {
        if let Some(stock) = data.stock
            && stock < 0
        {
            return Err(RepoError::Validation("stock must be >= 0".into()));
        }

        let mut set_parts: Vec<&str> = Vec::new();
        if data.color.is_some() {
            set_parts.push("color = $color");
        }
        if data.talla.is_some() {
            set_parts.push("talla = $talla");
        }
        if data.stock.is_some() {
            set_parts.push("stock = $stock");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Inventario {} not found", id)));
        }

        let query = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));
        let mut q = self
            .base
            .db()
            .query(query)
            .bind(("thing", record_id(INVENTARIO_TABLE, id)));
        if let Some(v) = data.color {
            q = q.bind(("color", v));
        }
        if let Some(v) = data.talla {
            q = q.bind(("talla", v));
        }
        if let Some(v) = data.stock {
            q = q.bind(("stock", v));
        }

        let items: Vec<InventarioItem> = q.await?.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Inventario {} not found", id)))
    }

    /// Delete a slot nothing references. Slots drawn on by any order line
    /// stay, so sold history keeps resolving; the existence check and the
    /// reference check share the delete's transaction.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = self
            .base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                IF (SELECT * FROM $thing)[0] == NONE { THROW 'E_NOT_FOUND' };
                LET $refs = (SELECT count() AS total FROM orden_item WHERE inventario = $thing GROUP ALL);
                IF array::len($refs) > 0 { THROW 'E_REFERENCIADO' };
                DELETE $thing;
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("thing", record_id(INVENTARIO_TABLE, id)))
            .await?
            .check();

        if let Err(e) = result {
            let msg = e.to_string();
            if msg.contains("E_NOT_FOUND") {
                return Err(RepoError::NotFound(format!("Inventario {} not found", id)));
            }
            if msg.contains("E_REFERENCIADO") {
                return Err(RepoError::Conflict(
                    "slot is referenced by order lines".into(),
                ));
            }
            return Err(e.into());
        }
        Ok(())
    }

    /// Conditional decrement: reduce stock by `cantidad` only if the result
    /// stays non-negative. One atomic statement; returns whether it applied.
    pub async fn try_decrement(&self, id: &str, cantidad: i64) -> RepoResult<bool> {
        if cantidad <= 0 {
            return Err(RepoError::Validation("cantidad must be > 0".into()));
        }

        let updated: Vec<InventarioItem> = self
            .base
            .db()
            .query("UPDATE $thing SET stock -= $n WHERE stock >= $n RETURN AFTER")
            .bind(("thing", record_id(INVENTARIO_TABLE, id)))
            .bind(("n", cantidad))
            .await?
            .take(0)?;

        Ok(!updated.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use shared::dto::{CheckoutItemInput, CheckoutRequest};

    use super::*;
    use crate::db::DbService;
    use crate::db::repository::OrdenRepository;

    async fn setup() -> (InventarioRepository, OrdenRepository) {
        let service = DbService::memory().await.unwrap();
        (
            InventarioRepository::new(service.db.clone()),
            OrdenRepository::new(service.db),
        )
    }

    async fn seed_slot(repo: &InventarioRepository, talla: &str) -> String {
        let created = repo
            .create(InventarioCreate {
                producto_id: "camiseta".into(),
                color: "negro".into(),
                talla: talla.into(),
                stock: 5,
            })
            .await
            .unwrap();
        created.id.unwrap().to_string()
    }

    #[tokio::test]
    async fn delete_removes_unreferenced_slot() {
        let (inventario, _) = setup().await;
        let slot = seed_slot(&inventario, "M").await;

        inventario.delete(&slot).await.unwrap();
        assert!(inventario.find_by_id(&slot).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_refuses_slot_referenced_by_order_line() {
        let (inventario, ordenes) = setup().await;
        let slot = seed_slot(&inventario, "M").await;

        ordenes
            .create_checkout(CheckoutRequest {
                usuario: "usuario:cliente1".into(),
                items: vec![CheckoutItemInput {
                    inventario_id: slot.clone(),
                    cantidad: 2,
                    precio: 19.99,
                }],
                metodo_pago: None,
                comprobante_url: None,
            })
            .await
            .unwrap();

        let err = inventario.delete(&slot).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));
        // Still there, still sellable
        assert_eq!(inventario.find_by_id(&slot).await.unwrap().unwrap().stock, 5);
    }

    #[tokio::test]
    async fn delete_unknown_slot_is_not_found() {
        let (inventario, _) = setup().await;
        let err = inventario.delete("inventario:nope").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
