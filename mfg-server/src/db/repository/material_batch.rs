//! Material Batch Repository
//!
//! Batches are always returned in FIFO order (`purchase_date`, then `id`).

use super::{RepoError, RepoResult, placeholders};
use shared::models::{BatchStatus, MaterialBatch};
use shared::util::now_millis;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str =
    "id, material_id, initial_stock, remaining_stock, cost_per_unit, purchase_date, status, created_at";

/// New batch row, already validated by the caller
#[derive(Debug, Clone)]
pub struct NewBatch {
    pub material_id: i64,
    pub initial_stock: f64,
    pub remaining_stock: f64,
    pub cost_per_unit: f64,
    pub purchase_date: i64,
    pub status: BatchStatus,
}

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<MaterialBatch>> {
    let batch = sqlx::query_as::<_, MaterialBatch>(&format!(
        "SELECT {COLUMNS} FROM material_batch WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(batch)
}

pub async fn find_by_material(
    executor: impl SqliteExecutor<'_>,
    material_id: i64,
) -> RepoResult<Vec<MaterialBatch>> {
    let batches = sqlx::query_as::<_, MaterialBatch>(&format!(
        "SELECT {COLUMNS} FROM material_batch WHERE material_id = ? ORDER BY purchase_date, id"
    ))
    .bind(material_id)
    .fetch_all(executor)
    .await?;
    Ok(batches)
}

/// Load the batches of several materials in one statement
pub async fn find_by_materials(
    executor: impl SqliteExecutor<'_>,
    material_ids: &[i64],
) -> RepoResult<Vec<MaterialBatch>> {
    if material_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {COLUMNS} FROM material_batch WHERE material_id IN ({}) ORDER BY purchase_date, id",
        placeholders(material_ids.len())
    );
    let mut query = sqlx::query_as::<_, MaterialBatch>(&sql);
    for id in material_ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(executor).await?)
}

/// Every batch with stock still on hand (input of the ABC report)
pub async fn find_with_stock(pool: &SqlitePool) -> RepoResult<Vec<MaterialBatch>> {
    let batches = sqlx::query_as::<_, MaterialBatch>(&format!(
        "SELECT {COLUMNS} FROM material_batch WHERE remaining_stock > 0 ORDER BY material_id, purchase_date, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(batches)
}

pub async fn create(pool: &SqlitePool, data: NewBatch) -> RepoResult<MaterialBatch> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO material_batch (material_id, initial_stock, remaining_stock, cost_per_unit, purchase_date, status, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.material_id)
    .bind(data.initial_stock)
    .bind(data.remaining_stock)
    .bind(data.cost_per_unit)
    .bind(data.purchase_date)
    .bind(data.status)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create material batch".into()))
}

/// Insert or overwrite batches keyed by id
pub async fn upsert(executor: impl SqliteExecutor<'_>, batches: &[MaterialBatch]) -> RepoResult<u64> {
    if batches.is_empty() {
        return Ok(0);
    }
    let values = vec!["(?, ?, ?, ?, ?, ?, ?, ?)"; batches.len()].join(", ");
    let sql = format!(
        "INSERT INTO material_batch ({COLUMNS}) VALUES {values} \
         ON CONFLICT(id) DO UPDATE SET \
         material_id = excluded.material_id, initial_stock = excluded.initial_stock, \
         remaining_stock = excluded.remaining_stock, cost_per_unit = excluded.cost_per_unit, \
         purchase_date = excluded.purchase_date, status = excluded.status"
    );
    let mut query = sqlx::query(&sql);
    for b in batches {
        query = query
            .bind(b.id)
            .bind(b.material_id)
            .bind(b.initial_stock)
            .bind(b.remaining_stock)
            .bind(b.cost_per_unit)
            .bind(b.purchase_date)
            .bind(b.status)
            .bind(b.created_at);
    }
    Ok(query.execute(executor).await?.rows_affected())
}

/// Set a batch's `remaining_stock` to `new_remaining`, but only if it still
/// holds `expected` (compare-and-set)
///
/// The new value is computed by the caller in `Decimal`; the store never does
/// arithmetic on stock. Returns `false` when the batch changed since it was
/// read, or does not exist.
pub async fn swap_remaining_stock(
    executor: impl SqliteExecutor<'_>,
    batch_id: i64,
    expected: f64,
    new_remaining: f64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE material_batch SET remaining_stock = ?1 WHERE id = ?2 AND remaining_stock = ?3",
    )
    .bind(new_remaining)
    .bind(batch_id)
    .bind(expected)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() == 1)
}
