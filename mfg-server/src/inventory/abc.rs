//! ABC inventory classification
//!
//! Ranks materials by the value of the stock on hand and splits them into
//! A / B / C tiers by cumulative share of the total value.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Material, MaterialBatch};

use super::{QuantityError, checked_mul, checked_sum, money_to_f64, to_decimal, try_decimal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

/// Cumulative-share cut-offs, as fractions of total value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbcThresholds {
    pub a: f64,
    pub b: f64,
}

impl Default for AbcThresholds {
    fn default() -> Self {
        Self { a: 0.80, b: 0.95 }
    }
}

impl AbcThresholds {
    /// `0 < a < b <= 1`
    ///
    /// With `a == b` the B tier could never be assigned.
    pub fn is_valid(&self) -> bool {
        self.a > 0.0 && self.a < self.b && self.b <= 1.0
    }
}

/// Stock value of one material
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialValue {
    pub material_id: i64,
    pub name: String,
    pub unit: String,
    pub stock: Decimal,
    pub value: Decimal,
}

impl MaterialValue {
    /// Sum remaining stock and its value (remaining × cost) per material
    ///
    /// Materials without batches appear with zero stock. Fails instead of
    /// wrapping when a value does not fit in `Decimal`.
    pub fn from_batches(
        materials: &[Material],
        batches: &[MaterialBatch],
    ) -> Result<Vec<Self>, QuantityError> {
        let mut totals: BTreeMap<i64, (Decimal, Decimal)> = BTreeMap::new();
        for batch in batches {
            let remaining = try_decimal(batch.remaining_stock)?.max(Decimal::ZERO);
            let value = checked_mul(remaining, try_decimal(batch.cost_per_unit)?)?;
            let entry = totals.entry(batch.material_id).or_default();
            entry.0 = checked_sum([entry.0, remaining])?;
            entry.1 = checked_sum([entry.1, value])?;
        }
        Ok(materials
            .iter()
            .map(|m| {
                let (stock, value) = totals.get(&m.id).copied().unwrap_or_default();
                Self {
                    material_id: m.id,
                    name: m.name.clone(),
                    unit: m.unit.clone(),
                    stock,
                    value,
                }
            })
            .collect())
    }
}

/// One row of the ABC report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbcItem {
    pub material_id: i64,
    pub name: String,
    pub unit: String,
    pub stock: f64,
    pub value: f64,
    /// Percent of total value
    pub share: f64,
    /// Percent of total value up to and including this row
    pub cumulative_share: f64,
    pub class: AbcClass,
}

/// Rank by value (descending, ties by material id) and assign tiers
///
/// A row's tier is decided by the cumulative share of the rows ranked above
/// it: below `a` is A, below `b` is B, otherwise C. The top row is therefore
/// always A, and the row that crosses a cut-off stays in the tier it started
/// in. If the total value is zero every row is C.
pub fn classify_abc(
    mut items: Vec<MaterialValue>,
    thresholds: AbcThresholds,
) -> Result<Vec<AbcItem>, QuantityError> {
    items.sort_by(|x, y| {
        y.value
            .cmp(&x.value)
            .then_with(|| x.material_id.cmp(&y.material_id))
    });

    // 各行非负, 累计值不超过总值
    let total = checked_sum(items.iter().map(|i| i.value))?;
    let a = to_decimal(thresholds.a);
    let b = to_decimal(thresholds.b);
    let hundred = Decimal::ONE_HUNDRED;

    let mut cumulative = Decimal::ZERO;
    Ok(items
        .into_iter()
        .map(|item| {
            let (share, before) = if total.is_zero() {
                (Decimal::ZERO, None)
            } else {
                (item.value / total, Some(cumulative / total))
            };
            let class = match before {
                None => AbcClass::C,
                Some(before) if before < a => AbcClass::A,
                Some(before) if before < b => AbcClass::B,
                Some(_) => AbcClass::C,
            };
            cumulative += item.value;
            let cumulative_share = if total.is_zero() {
                Decimal::ZERO
            } else {
                cumulative / total
            };

            AbcItem {
                material_id: item.material_id,
                name: item.name,
                unit: item.unit,
                stock: super::to_f64(item.stock),
                value: money_to_f64(item.value),
                share: money_to_f64(share * hundred),
                cumulative_share: money_to_f64(cumulative_share * hundred),
                class,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, value: i64) -> MaterialValue {
        MaterialValue {
            material_id: id,
            name: format!("M{id}"),
            unit: "pcs".into(),
            stock: Decimal::from(value),
            value: Decimal::from(value),
        }
    }

    #[test]
    fn test_classic_split() {
        let items = vec![item(1, 10), item(2, 700), item(3, 200), item(4, 50), item(5, 40)];
        let report = classify_abc(items, AbcThresholds::default()).unwrap();

        let order: Vec<_> = report.iter().map(|r| r.material_id).collect();
        assert_eq!(order, vec![2, 3, 4, 5, 1]);
        // 700 (70%) -> A, 200 (crosses 80% from 70%) -> A,
        // 50 (from 90%) -> B, 40 (from 95%) -> C, 10 -> C
        let classes: Vec<_> = report.iter().map(|r| r.class).collect();
        assert_eq!(
            classes,
            vec![AbcClass::A, AbcClass::A, AbcClass::B, AbcClass::C, AbcClass::C]
        );
        assert_eq!(report[0].share, 70.0);
        assert_eq!(report[4].cumulative_share, 100.0);
    }

    #[test]
    fn test_single_dominant_item_is_a() {
        let report = classify_abc(vec![item(1, 1000), item(2, 1)], AbcThresholds::default()).unwrap();
        assert_eq!(report[0].class, AbcClass::A);
        assert_eq!(report[1].class, AbcClass::C);
    }

    #[test]
    fn test_zero_total_is_all_c() {
        let report = classify_abc(vec![item(1, 0), item(2, 0)], AbcThresholds::default()).unwrap();
        assert!(report.iter().all(|r| r.class == AbcClass::C));
        assert!(report.iter().all(|r| r.share == 0.0));
    }

    fn material(id: i64) -> Material {
        Material {
            id,
            name: format!("M{id}"),
            unit: "kg".into(),
            vendor: None,
            category: None,
            is_active: true,
            created_at: 0,
        }
    }

    fn batch(id: i64, material_id: i64, remaining: f64, cost: f64) -> MaterialBatch {
        MaterialBatch {
            id,
            material_id,
            initial_stock: remaining.max(100.0),
            remaining_stock: remaining,
            cost_per_unit: cost,
            purchase_date: 0,
            status: shared::models::BatchStatus::Received,
            created_at: 0,
        }
    }

    #[test]
    fn test_values_from_batches() {
        let values = MaterialValue::from_batches(
            &[material(1), material(2)],
            &[batch(1, 1, 10.0, 1.5), batch(2, 1, 4.0, 2.0)],
        )
        .unwrap();
        assert_eq!(values[0].stock, Decimal::from(14));
        assert_eq!(values[0].value, Decimal::from(23));
        assert_eq!(values[1].value, Decimal::ZERO);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(AbcThresholds::default().is_valid());
        assert!(!AbcThresholds { a: 0.9, b: 0.8 }.is_valid());
        assert!(!AbcThresholds { a: 0.0, b: 0.8 }.is_valid());
        // no room for a B tier
        assert!(!AbcThresholds { a: 0.8, b: 0.8 }.is_valid());
        assert!(AbcThresholds { a: 0.8, b: 1.0 }.is_valid());
    }

    #[test]
    fn test_unrepresentable_value_is_an_error() {
        // 1e15 × 1e15 is beyond Decimal's 96-bit mantissa
        let err = MaterialValue::from_batches(&[material(1)], &[batch(1, 1, 1e15, 1e15)])
            .unwrap_err();
        assert_eq!(err, QuantityError::Overflow);

        let err = MaterialValue::from_batches(&[material(1)], &[batch(1, 1, f64::NAN, 1.0)])
            .unwrap_err();
        assert!(matches!(err, QuantityError::NotRepresentable(_)));

        let huge = MaterialValue {
            value: Decimal::MAX,
            ..item(1, 0)
        };
        let err = classify_abc(vec![huge.clone(), huge], AbcThresholds::default()).unwrap_err();
        assert_eq!(err, QuantityError::Overflow);
    }
}
