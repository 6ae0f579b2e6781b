//! Material reservation status
//!
//! Classifies whether a material requirement can be met from its batches,
//! and merges per-material outcomes into one order-level status.

use rust_decimal::Decimal;
use shared::models::{BatchStatus, MaterialBatch, ReservationStatus};

use super::to_decimal;

/// Stock per procurement state, summed over a material's batches
#[derive(Debug, Default, Clone, Copy)]
struct StockTotals {
    received: Decimal,
    expected: Decimal,
    requested: Decimal,
    has_expected: bool,
    has_requested: bool,
    has_delayed: bool,
}

impl StockTotals {
    fn from_batches(batches: &[MaterialBatch]) -> Self {
        let mut totals = Self::default();
        for batch in batches {
            let stock = to_decimal(batch.remaining_stock).max(Decimal::ZERO);
            match batch.status {
                BatchStatus::Received => totals.received += stock,
                BatchStatus::Expected => {
                    totals.expected += stock;
                    totals.has_expected |= stock > Decimal::ZERO;
                }
                BatchStatus::Requested => {
                    totals.requested += stock;
                    totals.has_requested |= stock > Decimal::ZERO;
                }
                BatchStatus::Delayed => totals.has_delayed |= stock > Decimal::ZERO,
            }
        }
        totals
    }

    /// Delayed stock is not counted
    fn available(&self) -> Decimal {
        self.received + self.expected + self.requested
    }
}

/// Classify one material's requirement against its batches
///
/// In priority order:
/// 1. `not enough` if received + expected + requested stock < required
/// 2. `booked` if received stock alone covers it
/// 3. `expected` if an expected batch exists
/// 4. `requested` if a requested batch exists
/// 5. `not enough`
///
/// A requirement of zero (or less) is trivially `booked`.
pub fn calculate_order_material_status(
    batches: &[MaterialBatch],
    required: f64,
) -> ReservationStatus {
    let required = to_decimal(required);
    if required <= Decimal::ZERO {
        return ReservationStatus::Booked;
    }

    let totals = StockTotals::from_batches(batches);
    if totals.available() < required {
        ReservationStatus::NotEnough
    } else if totals.received >= required {
        ReservationStatus::Booked
    } else if totals.has_expected {
        ReservationStatus::Expected
    } else if totals.has_requested {
        ReservationStatus::Requested
    } else {
        ReservationStatus::NotEnough
    }
}

/// Per-material status used by the order report
///
/// Same as [`calculate_order_material_status`], except that a requirement
/// waiting on incoming stock (`expected` / `requested`) reports `delayed`
/// when one of its batches has been delayed by the vendor.
pub fn material_status(batches: &[MaterialBatch], required: f64) -> ReservationStatus {
    let status = calculate_order_material_status(batches, required);
    match status {
        ReservationStatus::Expected | ReservationStatus::Requested
            if StockTotals::from_batches(batches).has_delayed =>
        {
            ReservationStatus::Delayed
        }
        other => other,
    }
}

/// Merge statuses by priority: not enough > delayed > requested > expected > booked
///
/// An empty set merges to `booked`.
pub fn merge_statuses<I>(statuses: I) -> ReservationStatus
where
    I: IntoIterator<Item = ReservationStatus>,
{
    statuses
        .into_iter()
        .max_by_key(|s| s.priority())
        .unwrap_or(ReservationStatus::Booked)
}
