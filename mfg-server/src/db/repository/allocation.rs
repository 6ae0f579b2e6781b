//! Material Allocation Repository

use super::RepoResult;
use shared::models::{MaterialAllocation, MaterialAllocationCreate};
use shared::util::now_millis;
use sqlx::SqliteExecutor;

pub async fn insert(
    executor: impl SqliteExecutor<'_>,
    data: &MaterialAllocationCreate,
) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO material_allocation (order_id, order_product_id, material_id, batch_id, quantity, allocation_type, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.order_id)
    .bind(data.order_product_id)
    .bind(data.material_id)
    .bind(data.batch_id)
    .bind(data.quantity)
    .bind(data.allocation_type)
    .bind(now_millis())
    .fetch_one(executor)
    .await?;
    Ok(id)
}

pub async fn find_by_order(
    executor: impl SqliteExecutor<'_>,
    order_id: i64,
) -> RepoResult<Vec<MaterialAllocation>> {
    let rows = sqlx::query_as::<_, MaterialAllocation>(
        "SELECT id, order_id, order_product_id, material_id, batch_id, quantity, allocation_type, created_at FROM material_allocation WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn count_by_order(executor: impl SqliteExecutor<'_>, order_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM material_allocation WHERE order_id = ?")
        .bind(order_id)
        .fetch_one(executor)
        .await?;
    Ok(count)
}

pub async fn delete_by_order(executor: impl SqliteExecutor<'_>, order_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM material_allocation WHERE order_id = ?")
        .bind(order_id)
        .execute(executor)
        .await?;
    Ok(rows.rows_affected())
}
