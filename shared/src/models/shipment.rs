//! Shipment Model

use serde::{Deserialize, Serialize};

/// Shipment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum ShipmentStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
}

/// Shipment entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shipment {
    pub id: i64,
    pub order_id: i64,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub status: ShipmentStatus,
    pub shipped_at: Option<i64>,
    pub created_at: i64,
}

/// Create shipment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentCreate {
    pub order_id: i64,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
}

/// Shipment with its order and originating quote resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShipmentWithLinks {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub shipment: Shipment,
    pub order_number: String,
    pub customer: String,
    pub quote_id: Option<i64>,
    pub quote_number: Option<String>,
}
