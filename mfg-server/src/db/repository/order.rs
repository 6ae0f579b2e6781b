//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderCreate, OrderProduct, PartsStatus};
use shared::util::now_millis;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, order_number, customer, status, parts_status, quote_id, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(order)
}

/// Create an order with its line items
pub async fn create(pool: &SqlitePool, data: OrderCreate) -> RepoResult<Order> {
    let mut tx = pool.begin().await?;
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (order_number, customer, quote_id, created_at) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.order_number)
    .bind(&data.customer)
    .bind(data.quote_id)
    .bind(now_millis())
    .fetch_one(&mut *tx)
    .await?;
    for line in &data.lines {
        sqlx::query("INSERT INTO order_product (order_id, product_id, quantity) VALUES (?, ?, ?)")
            .bind(id)
            .bind(line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
    }
    let order = find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))?;
    tx.commit().await?;
    Ok(order)
}

pub async fn find_lines(
    executor: impl SqliteExecutor<'_>,
    order_id: i64,
) -> RepoResult<Vec<OrderProduct>> {
    let lines = sqlx::query_as::<_, OrderProduct>(
        "SELECT id, order_id, product_id, quantity FROM order_product WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(executor)
    .await?;
    Ok(lines)
}

pub async fn update_parts_status(
    executor: impl SqliteExecutor<'_>,
    order_id: i64,
    status: PartsStatus,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE orders SET parts_status = ? WHERE id = ?")
        .bind(status)
        .bind(order_id)
        .execute(executor)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {order_id} not found")));
    }
    Ok(())
}

/// Ids of every order, oldest first
pub async fn find_all_ids(pool: &SqlitePool) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM orders ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(ids)
}
