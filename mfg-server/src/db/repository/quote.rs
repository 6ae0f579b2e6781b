//! Quote Repository

use super::{RepoError, RepoResult};
use shared::models::{Quote, QuoteCreate};
use shared::util::now_millis;
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Quote>> {
    let quote = sqlx::query_as::<_, Quote>(
        "SELECT id, quote_number, customer, rfq_reference, total, status, created_at FROM quote WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(quote)
}

pub async fn create(pool: &SqlitePool, data: QuoteCreate) -> RepoResult<Quote> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO quote (quote_number, customer, rfq_reference, total, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.quote_number)
    .bind(&data.customer)
    .bind(&data.rfq_reference)
    .bind(data.total)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create quote".into()))
}
