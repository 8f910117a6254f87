use shared::dto::{CheckoutItemInput, CheckoutRequest, ComprobanteRequest};
use shared::models::{ComprobanteEstado, OrdenEstado, PagoAction};

use super::*;
use crate::db::DbService;
use crate::db::repository::{ComprobanteRepository, InventarioRepository, OrdenRepository};

struct TestCtx {
    engine: VerificationEngine,
    inventario: InventarioRepository,
    ordenes: OrdenRepository,
    comprobantes: ComprobanteRepository,
}

async fn setup() -> TestCtx {
    let service = DbService::memory().await.unwrap();
    let db = service.db;
    TestCtx {
        engine: VerificationEngine::new(db.clone()),
        inventario: InventarioRepository::new(db.clone()),
        ordenes: OrdenRepository::new(db.clone()),
        comprobantes: ComprobanteRepository::new(db),
    }
}

async fn seed_slot(ctx: &TestCtx, color: &str, talla: &str, stock: i64) -> String {
    let created = ctx
        .inventario
        .create(shared::dto::InventarioCreate {
            producto_id: "camiseta".into(),
            color: color.into(),
            talla: talla.into(),
            stock,
        })
        .await
        .unwrap();
    created.id.unwrap().to_string()
}

/// Checkout an order (with a pending proof) drawing from the given slots
async fn seed_order(ctx: &TestCtx, lines: &[(&str, i64)]) -> (String, String) {
    let orden = ctx
        .ordenes
        .create_checkout(CheckoutRequest {
            usuario: "usuario:cliente1".into(),
            items: lines
                .iter()
                .map(|(slot, cantidad)| CheckoutItemInput {
                    inventario_id: (*slot).to_string(),
                    cantidad: *cantidad,
                    precio: 19.99,
                })
                .collect(),
            metodo_pago: Some("transferencia".into()),
            comprobante_url: Some("https://storage.example/comprobantes/p.jpg".into()),
        })
        .await
        .unwrap();
    let orden_id = orden.id.unwrap().to_string();
    let proofs = ctx.comprobantes.list_by_orden(&orden_id).await.unwrap();
    let comprobante_id = proofs[0].id.clone().unwrap().to_string();
    (orden_id, comprobante_id)
}

async fn stock_of(ctx: &TestCtx, slot_id: &str) -> i64 {
    ctx.inventario
        .find_by_id(slot_id)
        .await
        .unwrap()
        .unwrap()
        .stock
}

#[tokio::test]
async fn verify_success_decrements_stock() {
    // Scenario A: stock 5, cantidad 3
    let ctx = setup().await;
    let slot = seed_slot(&ctx, "negro", "M", 5).await;
    let (orden_id, comprobante_id) = seed_order(&ctx, &[(&slot, 3)]).await;

    let resolved = ctx
        .engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Verify)
        .await
        .unwrap();

    assert_eq!(resolved.estado, OrdenEstado::Pagado);
    assert_eq!(stock_of(&ctx, &slot).await, 2);

    let orden = ctx.ordenes.find_by_id(&orden_id).await.unwrap().unwrap();
    assert_eq!(orden.estado, OrdenEstado::Pagado);
    let proof = ctx
        .comprobantes
        .find_by_id(&comprobante_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(proof.estado, ComprobanteEstado::Verificado);
}

#[tokio::test]
async fn verify_insufficient_stock_changes_nothing() {
    // Scenario B: stock 5, cantidad 6
    let ctx = setup().await;
    let slot = seed_slot(&ctx, "negro", "M", 5).await;
    let (orden_id, comprobante_id) = seed_order(&ctx, &[(&slot, 6)]).await;

    let err = ctx
        .engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Verify)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::InsufficientStock));

    // The attempt failed, the state machine did not move
    assert_eq!(stock_of(&ctx, &slot).await, 5);
    let orden = ctx.ordenes.find_by_id(&orden_id).await.unwrap().unwrap();
    assert_eq!(orden.estado, OrdenEstado::Pendiente);
    let proof = ctx
        .comprobantes
        .find_by_id(&comprobante_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(proof.estado, ComprobanteEstado::Pendiente);
}

#[tokio::test]
async fn multi_line_failure_rolls_back_every_slot() {
    // Two lines; the second one cannot be satisfied. The first slot must
    // come out untouched.
    let ctx = setup().await;
    let slot_a = seed_slot(&ctx, "negro", "M", 10).await;
    let slot_b = seed_slot(&ctx, "blanco", "L", 1).await;
    let (orden_id, comprobante_id) = seed_order(&ctx, &[(&slot_a, 2), (&slot_b, 4)]).await;

    let err = ctx
        .engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Verify)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::InsufficientStock));

    assert_eq!(stock_of(&ctx, &slot_a).await, 10);
    assert_eq!(stock_of(&ctx, &slot_b).await, 1);
}

#[tokio::test]
async fn second_verify_is_already_resolved() {
    let ctx = setup().await;
    let slot = seed_slot(&ctx, "negro", "M", 5).await;
    let (orden_id, comprobante_id) = seed_order(&ctx, &[(&slot, 3)]).await;

    ctx.engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Verify)
        .await
        .unwrap();

    let err = ctx
        .engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Verify)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::AlreadyResolved));

    // No re-decrement happened
    assert_eq!(stock_of(&ctx, &slot).await, 2);
}

#[tokio::test]
async fn reject_then_verify_is_already_resolved() {
    // Scenario D
    let ctx = setup().await;
    let slot = seed_slot(&ctx, "negro", "M", 5).await;
    let (orden_id, comprobante_id) = seed_order(&ctx, &[(&slot, 3)]).await;

    let resolved = ctx
        .engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Reject)
        .await
        .unwrap();
    assert_eq!(resolved.estado, OrdenEstado::Rechazado);

    let proof = ctx
        .comprobantes
        .find_by_id(&comprobante_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(proof.estado, ComprobanteEstado::Rechazado);
    let orden = ctx.ordenes.find_by_id(&orden_id).await.unwrap().unwrap();
    assert_eq!(orden.estado, OrdenEstado::Rechazado);

    let err = ctx
        .engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Verify)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::AlreadyResolved));
    assert_eq!(stock_of(&ctx, &slot).await, 5);
}

#[tokio::test]
async fn reject_twice_is_already_resolved() {
    let ctx = setup().await;
    let slot = seed_slot(&ctx, "negro", "M", 5).await;
    let (orden_id, comprobante_id) = seed_order(&ctx, &[(&slot, 3)]).await;

    ctx.engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Reject)
        .await
        .unwrap();
    let err = ctx
        .engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Reject)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::AlreadyResolved));
}

#[tokio::test]
async fn proof_of_another_order_is_rejected() {
    let ctx = setup().await;
    let slot = seed_slot(&ctx, "negro", "M", 10).await;
    let (orden_a, _proof_a) = seed_order(&ctx, &[(&slot, 1)]).await;
    let (_orden_b, proof_b) = seed_order(&ctx, &[(&slot, 1)]).await;

    let err = ctx
        .engine
        .resolve_payment(&orden_a, &proof_b, PagoAction::Verify)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::ProofMismatch));
    assert_eq!(stock_of(&ctx, &slot).await, 10);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let ctx = setup().await;
    let slot = seed_slot(&ctx, "negro", "M", 5).await;
    let (orden_id, comprobante_id) = seed_order(&ctx, &[(&slot, 1)]).await;

    let err = ctx
        .engine
        .resolve_payment("orden:nope", &comprobante_id, PagoAction::Verify)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::NotFound(_)));

    let err = ctx
        .engine
        .resolve_payment(&orden_id, "comprobante_pago:nope", PagoAction::Verify)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::NotFound(_)));
}

#[tokio::test]
async fn resubmission_after_rejection_can_be_verified() {
    let ctx = setup().await;
    let slot = seed_slot(&ctx, "negro", "M", 5).await;
    let (orden_id, comprobante_id) = seed_order(&ctx, &[(&slot, 3)]).await;

    ctx.engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Reject)
        .await
        .unwrap();

    // Customer submits new evidence; the order returns to pendiente
    let new_proof = ctx
        .comprobantes
        .create(ComprobanteRequest {
            orden_id: orden_id.clone(),
            usuario: "usuario:cliente1".into(),
            metodo_pago: "deuna".into(),
            comprobante_url: "https://storage.example/comprobantes/p2.jpg".into(),
        })
        .await
        .unwrap();
    let orden = ctx.ordenes.find_by_id(&orden_id).await.unwrap().unwrap();
    assert_eq!(orden.estado, OrdenEstado::Pendiente);

    let new_proof_id = new_proof.id.unwrap().to_string();
    let resolved = ctx
        .engine
        .resolve_payment(&orden_id, &new_proof_id, PagoAction::Verify)
        .await
        .unwrap();
    assert_eq!(resolved.estado, OrdenEstado::Pagado);
    assert_eq!(stock_of(&ctx, &slot).await, 2);

    // The first, rejected proof stayed rejected
    let first = ctx
        .comprobantes
        .find_by_id(&comprobante_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.estado, ComprobanteEstado::Rechazado);
}

#[tokio::test]
async fn conditional_decrement_is_all_or_nothing() {
    let ctx = setup().await;
    let slot = seed_slot(&ctx, "negro", "M", 3).await;

    assert!(ctx.inventario.try_decrement(&slot, 3).await.unwrap());
    assert_eq!(stock_of(&ctx, &slot).await, 0);
    assert!(!ctx.inventario.try_decrement(&slot, 1).await.unwrap());
    assert_eq!(stock_of(&ctx, &slot).await, 0);
}

#[tokio::test]
async fn verified_order_accepts_no_more_proofs() {
    let ctx = setup().await;
    let slot = seed_slot(&ctx, "negro", "M", 5).await;
    let (orden_id, comprobante_id) = seed_order(&ctx, &[(&slot, 1)]).await;

    ctx.engine
        .resolve_payment(&orden_id, &comprobante_id, PagoAction::Verify)
        .await
        .unwrap();

    let err = ctx
        .comprobantes
        .create(ComprobanteRequest {
            orden_id: orden_id.clone(),
            usuario: "usuario:cliente1".into(),
            metodo_pago: "transferencia".into(),
            comprobante_url: "https://storage.example/comprobantes/p3.jpg".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        crate::db::repository::RepoError::Validation(_)
    ));
    // Just the one proof on record, still verificado
    let proofs = ctx.comprobantes.list_by_orden(&orden_id).await.unwrap();
    assert_eq!(proofs.len(), 1);
}
