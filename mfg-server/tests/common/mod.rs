//! 测试夹具: 内存数据库 + 基础数据

#![allow(dead_code)]

use mfg_server::db::repository::material_batch::NewBatch;
use mfg_server::db::repository::{material, material_batch, order, product};
use mfg_server::{Config, ServerState};
use shared::models::{
    BatchStatus, Material, MaterialBatch, MaterialCreate, Order, OrderCreate, OrderLineInput,
    Product, ProductCreate,
};
use shared::util::date_to_millis;
use sqlx::SqlitePool;

pub async fn state() -> ServerState {
    let config = Config::with_overrides("/tmp/mfg-server-tests", 0);
    ServerState::in_memory(config).await.unwrap()
}

pub async fn material(pool: &SqlitePool, name: &str) -> Material {
    material::create(
        pool,
        MaterialCreate {
            name: name.into(),
            unit: "kg".into(),
            vendor: Some("Nordic Steel".into()),
            category: None,
        },
    )
    .await
    .unwrap()
}

pub async fn batch(
    pool: &SqlitePool,
    material_id: i64,
    stock: f64,
    status: BatchStatus,
    date: &str,
) -> MaterialBatch {
    material_batch::create(
        pool,
        NewBatch {
            material_id,
            initial_stock: stock,
            remaining_stock: stock,
            cost_per_unit: 2.5,
            purchase_date: date_to_millis(date).unwrap(),
            status,
        },
    )
    .await
    .unwrap()
}

/// Product consuming `qty_per_unit` of each listed material
pub async fn product(pool: &SqlitePool, sku: &str, recipe: &[(i64, f64)]) -> Product {
    let p = product::create(
        pool,
        ProductCreate {
            sku: sku.into(),
            name: format!("Product {sku}"),
            price: 120.0,
            is_public: Some(true),
        },
    )
    .await
    .unwrap();
    product::set_recipe(pool, p.id, recipe).await.unwrap();
    p
}

pub async fn order(pool: &SqlitePool, number: &str, lines: &[(i64, f64)]) -> Order {
    order::create(
        pool,
        OrderCreate {
            order_number: number.into(),
            customer: "Acme".into(),
            quote_id: None,
            lines: lines
                .iter()
                .map(|(product_id, quantity)| OrderLineInput {
                    product_id: *product_id,
                    quantity: *quantity,
                })
                .collect(),
        },
    )
    .await
    .unwrap()
}

pub async fn remaining(pool: &SqlitePool, batch_id: i64) -> f64 {
    material_batch::find_by_id(pool, batch_id)
        .await
        .unwrap()
        .unwrap()
        .remaining_stock
}
