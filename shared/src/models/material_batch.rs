//! Material Batch Model

use serde::{Deserialize, Serialize};

/// Procurement status of a stock batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum BatchStatus {
    /// On the shelf, can be drawn
    Received,
    /// Ordered from the vendor, delivery date confirmed
    Expected,
    /// Purchase requested, not yet confirmed by the vendor
    Requested,
    /// Vendor reported a delay
    Delayed,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Expected => "expected",
            Self::Requested => "requested",
            Self::Delayed => "delayed",
        }
    }
}

/// Material batch entity (批次)
///
/// Invariant: `0 <= remaining_stock <= initial_stock`. Only allocation
/// decrements `remaining_stock`; only an allocation reset restores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MaterialBatch {
    pub id: i64,
    pub material_id: i64,
    pub initial_stock: f64,
    pub remaining_stock: f64,
    pub cost_per_unit: f64,
    /// Purchase date (Unix millis, UTC midnight)
    pub purchase_date: i64,
    pub status: BatchStatus,
    pub created_at: i64,
}

impl MaterialBatch {
    /// Whether the stock figures satisfy the batch invariant
    pub fn stock_is_valid(&self) -> bool {
        stock_is_valid(self.initial_stock, self.remaining_stock)
    }

    /// Whether anything can still be drawn from this batch
    pub fn has_stock(&self) -> bool {
        self.remaining_stock > 0.0
    }
}

/// Check `0 <= remaining <= initial` (and finiteness)
pub fn stock_is_valid(initial: f64, remaining: f64) -> bool {
    initial.is_finite() && remaining.is_finite() && remaining >= 0.0 && remaining <= initial
}

/// Create batch payload (recording purchased or expected stock)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialBatchCreate {
    pub initial_stock: f64,
    /// Defaults to `initial_stock`
    pub remaining_stock: Option<f64>,
    pub cost_per_unit: f64,
    /// `YYYY-MM-DD`
    pub purchase_date: String,
    pub status: BatchStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_invariant() {
        assert!(stock_is_valid(10.0, 10.0));
        assert!(stock_is_valid(10.0, 0.0));
        assert!(!stock_is_valid(10.0, 10.5));
        assert!(!stock_is_valid(10.0, -1.0));
        assert!(!stock_is_valid(f64::NAN, 0.0));
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&BatchStatus::Expected).unwrap();
        assert_eq!(json, "\"expected\"");
        assert!(serde_json::from_str::<BatchStatus>("\"lost\"").is_err());
    }
}
