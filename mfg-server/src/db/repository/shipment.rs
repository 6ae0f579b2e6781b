//! Shipment Repository

use super::{RepoError, RepoResult};
use shared::models::{Shipment, ShipmentCreate, ShipmentWithLinks};
use shared::util::now_millis;
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Shipment>> {
    let shipment = sqlx::query_as::<_, Shipment>(
        "SELECT id, order_id, carrier, tracking_number, status, shipped_at, created_at FROM shipment WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(shipment)
}

pub async fn create(pool: &SqlitePool, data: ShipmentCreate) -> RepoResult<Shipment> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO shipment (order_id, carrier, tracking_number, created_at) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(data.order_id)
    .bind(&data.carrier)
    .bind(&data.tracking_number)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create shipment".into()))
}

/// Shipments joined to their order and the order's originating quote
pub async fn find_with_links(pool: &SqlitePool) -> RepoResult<Vec<ShipmentWithLinks>> {
    let rows = sqlx::query_as::<_, ShipmentWithLinks>(
        "SELECT s.id, s.order_id, s.carrier, s.tracking_number, s.status, s.shipped_at, s.created_at, \
                o.order_number, o.customer, o.quote_id, q.quote_number \
         FROM shipment s \
         JOIN orders o ON o.id = s.order_id \
         LEFT JOIN quote q ON q.id = o.quote_id \
         ORDER BY s.created_at DESC, s.id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
