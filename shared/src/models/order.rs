//! Order Model (work orders and their line items)

use serde::{Deserialize, Serialize};

/// Order lifecycle status, edited by operators
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    #[default]
    Draft,
    Confirmed,
    InProduction,
    Shipped,
    Invoiced,
    Cancelled,
}

/// Aggregate procurement readiness of an order's materials
///
/// Stored verbatim as text. The mixed casing of the stored values is kept
/// for compatibility with existing rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum PartsStatus {
    #[default]
    #[serde(rename = "Not booked")]
    #[cfg_attr(feature = "db", sqlx(rename = "Not booked"))]
    NotBooked,
    #[serde(rename = "Not enough")]
    #[cfg_attr(feature = "db", sqlx(rename = "Not enough"))]
    NotEnough,
    #[serde(rename = "Requested")]
    #[cfg_attr(feature = "db", sqlx(rename = "Requested"))]
    Requested,
    #[serde(rename = "Expected")]
    #[cfg_attr(feature = "db", sqlx(rename = "Expected"))]
    Expected,
    #[serde(rename = "Delayed")]
    #[cfg_attr(feature = "db", sqlx(rename = "Delayed"))]
    Delayed,
    #[serde(rename = "Received")]
    #[cfg_attr(feature = "db", sqlx(rename = "Received"))]
    Received,
    #[serde(rename = "booked")]
    #[cfg_attr(feature = "db", sqlx(rename = "booked"))]
    Booked,
}

impl PartsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotBooked => "Not booked",
            Self::NotEnough => "Not enough",
            Self::Requested => "Requested",
            Self::Expected => "Expected",
            Self::Delayed => "Delayed",
            Self::Received => "Received",
            Self::Booked => "booked",
        }
    }
}

/// Work order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub customer: String,
    pub status: OrderStatus,
    pub parts_status: PartsStatus,
    /// Originating quote, if the order was converted from one
    pub quote_id: Option<i64>,
    pub created_at: i64,
}

/// Order line item (one product, one quantity)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderProduct {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: f64,
}

/// Line item input when creating an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub product_id: i64,
    pub quantity: f64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub order_number: String,
    pub customer: String,
    pub quote_id: Option<i64>,
    pub lines: Vec<OrderLineInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_status_serde_keeps_stored_spelling() {
        assert_eq!(
            serde_json::to_string(&PartsStatus::NotBooked).unwrap(),
            "\"Not booked\""
        );
        assert_eq!(
            serde_json::to_string(&PartsStatus::Booked).unwrap(),
            "\"booked\""
        );
        let parsed: PartsStatus = serde_json::from_str("\"Not enough\"").unwrap();
        assert_eq!(parsed, PartsStatus::NotEnough);
        assert_eq!(parsed.as_str(), "Not enough");
    }

    #[test]
    fn test_parts_status_rejects_unknown_value() {
        assert!(serde_json::from_str::<PartsStatus>("\"Booked\"").is_err());
        assert!(serde_json::from_str::<PartsStatus>("\"\"").is_err());
    }

    #[test]
    fn test_order_status_serde() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProduction).unwrap(),
            "\"in_production\""
        );
    }
}
