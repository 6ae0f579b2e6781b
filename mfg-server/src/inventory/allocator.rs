//! FIFO Material Allocator
//!
//! Draws a required quantity of one material from its batches, oldest
//! purchase first. Produces a plan; persisting it is the caller's job.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::MaterialBatch;

use super::{to_decimal, to_f64};

/// Quantity drawn from one batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchDraw {
    pub batch_id: i64,
    pub quantity: f64,
}

/// Result of [`allocate_material_batches`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationPlan {
    pub material_id: i64,
    pub required: f64,
    /// Draws in FIFO order
    pub allocations: Vec<BatchDraw>,
    /// Copies of the drawn batches with `remaining_stock` decremented
    pub updated_batches: Vec<MaterialBatch>,
    /// Quantity that could not be covered (0 when satisfied)
    pub shortfall: f64,
}

impl AllocationPlan {
    pub fn is_satisfied(&self) -> bool {
        self.shortfall <= 0.0
    }

    /// Total quantity drawn across all batches
    pub fn allocated(&self) -> f64 {
        to_f64(self.allocations.iter().map(|a| to_decimal(a.quantity)).sum())
    }
}

/// Plan a FIFO draw of `required` units of `material_id`
///
/// Batches of other materials and batches with no remaining stock are
/// ignored. Ties on `purchase_date` keep their input order.
pub fn allocate_material_batches(
    material_id: i64,
    required: f64,
    batches: &[MaterialBatch],
) -> AllocationPlan {
    let mut candidates: Vec<&MaterialBatch> = batches
        .iter()
        .filter(|b| b.material_id == material_id && b.has_stock())
        .collect();
    // sort_by_key is stable
    candidates.sort_by_key(|b| b.purchase_date);

    let mut still_needed = to_decimal(required).max(Decimal::ZERO);
    let mut allocations = Vec::new();
    let mut updated_batches = Vec::new();

    for batch in candidates {
        if still_needed <= Decimal::ZERO {
            break;
        }
        let remaining = to_decimal(batch.remaining_stock);
        let draw = remaining.min(still_needed);

        allocations.push(BatchDraw {
            batch_id: batch.id,
            quantity: to_f64(draw),
        });
        let mut updated = batch.clone();
        updated.remaining_stock = to_f64(remaining - draw);
        updated_batches.push(updated);

        still_needed -= draw;
    }

    AllocationPlan {
        material_id,
        required,
        allocations,
        updated_batches,
        shortfall: to_f64(still_needed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::BatchStatus;
    use shared::util::date_to_millis;

    fn batch(id: i64, remaining: f64, date: &str) -> MaterialBatch {
        MaterialBatch {
            id,
            material_id: 1,
            initial_stock: remaining.max(10.0),
            remaining_stock: remaining,
            cost_per_unit: 1.0,
            purchase_date: date_to_millis(date).unwrap(),
            status: BatchStatus::Received,
            created_at: 0,
        }
    }

    #[test]
    fn test_draws_oldest_first() {
        // given out of order on purpose
        let batches = vec![batch(2, 10.0, "2024-02-01"), batch(1, 5.0, "2024-01-01")];
        let plan = allocate_material_batches(1, 8.0, &batches);

        assert_eq!(
            plan.allocations,
            vec![
                BatchDraw { batch_id: 1, quantity: 5.0 },
                BatchDraw { batch_id: 2, quantity: 3.0 },
            ]
        );
        assert_eq!(plan.updated_batches[0].remaining_stock, 0.0);
        assert_eq!(plan.updated_batches[1].id, 2);
        assert_eq!(plan.updated_batches[1].remaining_stock, 7.0);
        assert!(plan.is_satisfied());
        assert_eq!(plan.allocated(), 8.0);
    }

    #[test]
    fn test_shortfall_when_stock_runs_out() {
        let batches = vec![batch(1, 5.0, "2024-01-01"), batch(2, 10.0, "2024-02-01")];
        let plan = allocate_material_batches(1, 20.0, &batches);
        assert_eq!(plan.allocated(), 15.0);
        assert_eq!(plan.shortfall, 5.0);
        assert!(!plan.is_satisfied());
    }

    #[test]
    fn test_zero_required_draws_nothing() {
        let batches = vec![batch(1, 5.0, "2024-01-01")];
        let plan = allocate_material_batches(1, 0.0, &batches);
        assert!(plan.allocations.is_empty());
        assert!(plan.updated_batches.is_empty());
        assert!(plan.is_satisfied());
    }

    #[test]
    fn test_skips_empty_batches_and_other_materials() {
        let mut foreign = batch(3, 50.0, "2023-01-01");
        foreign.material_id = 2;
        let batches = vec![batch(1, 0.0, "2023-06-01"), foreign, batch(2, 4.0, "2024-01-01")];
        let plan = allocate_material_batches(1, 3.0, &batches);
        assert_eq!(plan.allocations, vec![BatchDraw { batch_id: 2, quantity: 3.0 }]);
    }

    #[test]
    fn test_same_date_keeps_input_order() {
        let batches = vec![batch(7, 2.0, "2024-01-01"), batch(4, 2.0, "2024-01-01")];
        let plan = allocate_material_batches(1, 3.0, &batches);
        assert_eq!(plan.allocations[0].batch_id, 7);
        assert_eq!(plan.allocations[1].batch_id, 4);
    }

    #[test]
    fn test_never_overdraws_any_batch() {
        let remaining = [0.3, 1.7, 0.25, 12.0, 0.05];
        let batches: Vec<_> = remaining
            .iter()
            .enumerate()
            .map(|(i, r)| batch(i as i64 + 1, *r, &format!("2024-01-{:02}", i + 1)))
            .collect();
        let available: f64 = remaining.iter().sum();

        for required in [0.1, 0.3, 0.55, 2.0, 2.25, 14.3, 100.0] {
            let plan = allocate_material_batches(1, required, &batches);
            for draw in &plan.allocations {
                let source = batches.iter().find(|b| b.id == draw.batch_id).unwrap();
                assert!(draw.quantity <= source.remaining_stock);
                assert!(draw.quantity > 0.0);
            }
            let drawn = plan.allocated();
            assert!(drawn <= required + 1e-9);
            if available >= required {
                assert!((drawn - required).abs() < 1e-9, "required {required}, drew {drawn}");
            }
            for updated in &plan.updated_batches {
                assert!(updated.stock_is_valid());
            }
        }
    }

    #[test]
    fn test_fractional_draws_are_exact() {
        let batches = vec![batch(1, 0.1, "2024-01-01"), batch(2, 0.2, "2024-01-02")];
        let plan = allocate_material_batches(1, 0.3, &batches);
        assert_eq!(plan.shortfall, 0.0);
        assert_eq!(plan.updated_batches[1].remaining_stock, 0.0);
    }
}
