//! Inventory computations
//!
//! Pure functions over batch snapshots, no I/O:
//!
//! - [`allocator`] - FIFO draw plan for one material
//! - [`status`] - reservation status per material and merged per order
//! - [`abc`] - ABC classification by stock value
//!
//! Quantities are stored as `f64`; arithmetic goes through `Decimal` so
//! repeated draws do not accumulate float error.

pub mod abc;
pub mod allocator;
pub mod status;

pub use abc::{AbcClass, AbcItem, AbcThresholds, MaterialValue, classify_abc};
pub use allocator::{AllocationPlan, BatchDraw, allocate_material_batches};
pub use status::{calculate_order_material_status, material_status, merge_statuses};

use rust_decimal::prelude::*;
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// A quantity or value that does not fit in `Decimal`
///
/// Stored quantities are bounded by the schema, so this only surfaces for
/// rows written around it or for sums over very large inventories.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuantityError {
    #[error("quantity {0} cannot be represented")]
    NotRepresentable(f64),
    #[error("quantity arithmetic overflowed")]
    Overflow,
}

impl From<QuantityError> for AppError {
    fn from(err: QuantityError) -> Self {
        AppError::with_message(ErrorCode::ValueOutOfRange, err.to_string())
    }
}

/// Convert f64 to Decimal, rejecting NaN, infinities and out-of-range values
pub(crate) fn try_decimal(value: f64) -> Result<Decimal, QuantityError> {
    Decimal::from_f64(value).ok_or(QuantityError::NotRepresentable(value))
}

/// Convert f64 to Decimal for calculation
///
/// Only for values already checked with [`try_decimal`] (snapshot loading
/// does this) or bounded by construction.
#[inline]
pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

pub(crate) fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal, QuantityError> {
    a.checked_mul(b).ok_or(QuantityError::Overflow)
}

pub(crate) fn checked_sum<I>(values: I) -> Result<Decimal, QuantityError>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v).ok_or(QuantityError::Overflow))
}

/// Convert Decimal back to f64 for storage
///
/// Quantities are not rounded: a draw must never exceed the stock it was
/// computed from.
#[inline]
pub(crate) fn to_f64(value: Decimal) -> f64 {
    value.normalize().to_f64().unwrap_or_default()
}

/// Convert a monetary Decimal to f64, rounded to 2 decimal places (half-up)
#[inline]
pub(crate) fn money_to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}
