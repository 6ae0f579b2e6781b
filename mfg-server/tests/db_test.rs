//! Repository 集成测试

mod common;

use mfg_server::DbService;
use mfg_server::db::repository::{RepoError, material_batch, quote, shipment};
use shared::models::{BatchStatus, QuoteCreate, ShipmentCreate, ShipmentStatus};

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mfg.db");
    let path = path.to_str().unwrap();

    let db = DbService::new(path).await.unwrap();
    let steel = common::material(&db.pool, "Steel sheet").await;
    db.pool.close().await;

    // migrations are idempotent on reopen
    let db = DbService::new(path).await.unwrap();
    let found = mfg_server::db::repository::material::find_by_id(&db.pool, steel.id)
        .await
        .unwrap();
    assert_eq!(found.map(|m| m.name), Some("Steel sheet".to_string()));
}

#[tokio::test]
async fn test_stock_swap_checks_value_read() {
    let db = DbService::open_in_memory().await.unwrap();
    let steel = common::material(&db.pool, "Steel sheet").await;
    let b = common::batch(&db.pool, steel.id, 5.0, BatchStatus::Received, "2024-01-01").await;

    assert!(material_batch::swap_remaining_stock(&db.pool, b.id, 5.0, 2.0).await.unwrap());
    assert_eq!(common::remaining(&db.pool, b.id).await, 2.0);

    // stale read: the batch no longer holds 5
    assert!(!material_batch::swap_remaining_stock(&db.pool, b.id, 5.0, 0.0).await.unwrap());
    assert_eq!(common::remaining(&db.pool, b.id).await, 2.0);

    assert!(!material_batch::swap_remaining_stock(&db.pool, 9999, 1.0, 0.0).await.unwrap());
}

#[tokio::test]
async fn test_upsert_overwrites_by_id() {
    let db = DbService::open_in_memory().await.unwrap();
    let steel = common::material(&db.pool, "Steel sheet").await;
    let mut b = common::batch(&db.pool, steel.id, 5.0, BatchStatus::Expected, "2024-01-01").await;

    b.status = BatchStatus::Received;
    b.remaining_stock = 4.0;
    let affected = material_batch::upsert(&db.pool, std::slice::from_ref(&b)).await.unwrap();
    assert_eq!(affected, 1);

    let stored = material_batch::find_by_id(&db.pool, b.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BatchStatus::Received);
    assert_eq!(stored.remaining_stock, 4.0);
    assert_eq!(material_batch::upsert(&db.pool, &[]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_schema_rejects_invalid_stock() {
    let db = DbService::open_in_memory().await.unwrap();
    let steel = common::material(&db.pool, "Steel sheet").await;
    let mut b = common::batch(&db.pool, steel.id, 5.0, BatchStatus::Received, "2024-01-01").await;

    b.remaining_stock = 6.0;
    let err = material_batch::upsert(&db.pool, std::slice::from_ref(&b)).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // quantities are bounded so stock × cost stays representable
    b.initial_stock = 1e15;
    b.remaining_stock = 1e15;
    let err = material_batch::upsert(&db.pool, &[b]).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn test_duplicate_material_name() {
    let db = DbService::open_in_memory().await.unwrap();
    common::material(&db.pool, "Steel sheet").await;
    let err = mfg_server::db::repository::material::create(
        &db.pool,
        shared::models::MaterialCreate {
            name: "Steel sheet".into(),
            unit: "kg".into(),
            vendor: None,
            category: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn test_shipment_links_quote_and_order() {
    let db = DbService::open_in_memory().await.unwrap();
    let pool = &db.pool;

    let q = quote::create(
        pool,
        QuoteCreate {
            quote_number: "Q-2024-001".into(),
            customer: "Acme".into(),
            rfq_reference: Some("RFQ-77".into()),
            total: 1250.0,
        },
    )
    .await
    .unwrap();

    let steel = common::material(pool, "Steel sheet").await;
    let bracket = common::product(pool, "BRK-1", &[(steel.id, 1.0)]).await;
    let quoted = mfg_server::db::repository::order::create(
        pool,
        shared::models::OrderCreate {
            order_number: "WO-1".into(),
            customer: "Acme".into(),
            quote_id: Some(q.id),
            lines: vec![shared::models::OrderLineInput {
                product_id: bracket.id,
                quantity: 2.0,
            }],
        },
    )
    .await
    .unwrap();
    let walk_in = common::order(pool, "WO-2", &[(bracket.id, 1.0)]).await;

    for order_id in [quoted.id, walk_in.id] {
        shipment::create(
            pool,
            ShipmentCreate {
                order_id,
                carrier: Some("DHL".into()),
                tracking_number: None,
            },
        )
        .await
        .unwrap();
    }

    let rows = shipment::find_with_links(pool).await.unwrap();
    assert_eq!(rows.len(), 2);
    let linked = rows.iter().find(|r| r.shipment.order_id == quoted.id).unwrap();
    assert_eq!(linked.quote_number.as_deref(), Some("Q-2024-001"));
    assert_eq!(linked.shipment.status, ShipmentStatus::Pending);
    let unlinked = rows.iter().find(|r| r.shipment.order_id == walk_in.id).unwrap();
    assert_eq!(unlinked.quote_id, None);
    assert_eq!(unlinked.quote_number, None);
}

#[tokio::test]
async fn test_unknown_stored_status_fails_decode() {
    let db = DbService::open_in_memory().await.unwrap();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO quote (quote_number, customer, total, status, created_at) VALUES ('Q-X', 'Acme', 0, 'archived', 0) RETURNING id",
    )
    .fetch_one(&db.pool)
    .await
    .unwrap();

    let err = quote::find_by_id(&db.pool, id).await.unwrap_err();
    assert!(matches!(err, RepoError::Database(_)));
}
