//! Material Allocation Model

use serde::{Deserialize, Serialize};

use super::order::PartsStatus;

/// Reservation outcome for one material, or for a whole order after merging
///
/// Business outcome, not an error: `NotEnough` is an ordinary value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    #[serde(rename = "booked")]
    Booked,
    #[serde(rename = "expected")]
    Expected,
    #[serde(rename = "requested")]
    Requested,
    #[serde(rename = "delayed")]
    Delayed,
    #[serde(rename = "not enough")]
    NotEnough,
}

impl ReservationStatus {
    /// Merge rank: higher wins when statuses of several materials combine
    pub fn priority(&self) -> u8 {
        match self {
            Self::NotEnough => 4,
            Self::Delayed => 3,
            Self::Requested => 2,
            Self::Expected => 1,
            Self::Booked => 0,
        }
    }

    /// The order-level `parts_status` this outcome is persisted as
    pub fn to_parts_status(self) -> PartsStatus {
        match self {
            Self::Booked => PartsStatus::Booked,
            Self::Expected => PartsStatus::Expected,
            Self::Requested => PartsStatus::Requested,
            Self::Delayed => PartsStatus::Delayed,
            Self::NotEnough => PartsStatus::NotEnough,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Expected => "expected",
            Self::Requested => "requested",
            Self::Delayed => "delayed",
            Self::NotEnough => "not enough",
        }
    }
}

/// Allocation record: quantity of a material drawn from one batch for an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MaterialAllocation {
    pub id: i64,
    pub order_id: i64,
    pub order_product_id: Option<i64>,
    pub material_id: i64,
    pub batch_id: i64,
    pub quantity: f64,
    /// Mirrors the order's parts status at allocation time
    pub allocation_type: PartsStatus,
    pub created_at: i64,
}

/// Allocation row to insert (id and timestamp assigned by the store)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialAllocationCreate {
    pub order_id: i64,
    pub order_product_id: Option<i64>,
    pub material_id: i64,
    pub batch_id: i64,
    pub quantity: f64,
    pub allocation_type: PartsStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let mut all = vec![
            ReservationStatus::Booked,
            ReservationStatus::NotEnough,
            ReservationStatus::Expected,
            ReservationStatus::Delayed,
            ReservationStatus::Requested,
        ];
        all.sort_by_key(|s| std::cmp::Reverse(s.priority()));
        assert_eq!(
            all,
            vec![
                ReservationStatus::NotEnough,
                ReservationStatus::Delayed,
                ReservationStatus::Requested,
                ReservationStatus::Expected,
                ReservationStatus::Booked,
            ]
        );
    }

    #[test]
    fn test_serde_spelling() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::NotEnough).unwrap(),
            "\"not enough\""
        );
        assert_eq!(
            ReservationStatus::NotEnough.to_parts_status(),
            PartsStatus::NotEnough
        );
    }
}
