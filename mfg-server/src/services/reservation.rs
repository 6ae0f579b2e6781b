//! Material Reservation Service
//!
//! Aggregates the material status of an order and, when every material can
//! be served from received stock, books it by drawing FIFO from the batches.
//!
//! Each operation reads one snapshot and writes inside the same transaction.
//! New batch stock is computed in `Decimal` from that snapshot and written
//! with a compare-and-set on the value that was read, so a concurrent writer
//! that touched a batch first makes the booking fail and roll back instead
//! of overwriting its change.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{
    BatchStatus, MaterialAllocation, MaterialAllocationCreate, MaterialBatch, Order,
    OrderProduct, PartsStatus, ProductMaterial, ReservationStatus,
};
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::repository::{
    RepoError, allocation, material, material_batch, order, product,
};
use crate::inventory::{
    AllocationPlan, QuantityError, allocate_material_batches, checked_mul, checked_sum,
    material_status, merge_statuses, to_decimal, to_f64, try_decimal,
};
use crate::utils::{AppError, AppResult, ErrorCode};

// =============================================================================
// Report types
// =============================================================================

/// Requirement and status of one material on an order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRequirement {
    pub material_id: i64,
    /// Σ line quantity × quantity per unit
    pub required: f64,
    /// Received stock visible to this order (its own allocations included)
    pub received_stock: f64,
    pub status: ReservationStatus,
}

/// Material status of an order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReservationReport {
    pub order_id: i64,
    pub order_number: String,
    /// Merged status computed from the snapshot
    pub status: ReservationStatus,
    /// Stored `orders.parts_status` after the operation
    pub parts_status: PartsStatus,
    pub materials: Vec<MaterialRequirement>,
    /// Allocations the order holds after the operation
    pub allocations: Vec<MaterialAllocation>,
}

/// Outcome of a bulk reset
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResetTally {
    pub succeeded: usize,
    pub failed: usize,
    pub failed_order_ids: Vec<i64>,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything one reservation decision reads, loaded once
#[derive(Debug)]
struct Snapshot {
    order: Order,
    lines: Vec<OrderProduct>,
    recipes: Vec<ProductMaterial>,
    batches: Vec<MaterialBatch>,
    own_allocations: Vec<MaterialAllocation>,
}

impl Snapshot {
    async fn load(conn: &mut SqliteConnection, order_id: i64) -> AppResult<Self> {
        let order = order::find_by_id(&mut *conn, order_id)
            .await?
            .ok_or_else(|| order_not_found(order_id))?;
        let lines = order::find_lines(&mut *conn, order_id).await?;
        let recipes = product::find_recipes_for_order(&mut *conn, order_id).await?;
        let own_allocations = allocation::find_by_order(&mut *conn, order_id).await?;

        // held materials may have left the recipe; their batches are still needed to release them
        let mut material_ids: Vec<i64> = recipes
            .iter()
            .map(|r| r.material_id)
            .chain(own_allocations.iter().map(|a| a.material_id))
            .collect();
        material_ids.sort_unstable();
        material_ids.dedup();
        let batches = material_batch::find_by_materials(&mut *conn, &material_ids).await?;

        let snapshot = Self {
            order,
            lines,
            recipes,
            batches,
            own_allocations,
        };
        snapshot.check_quantities()?;
        Ok(snapshot)
    }

    /// Every stored quantity must convert to `Decimal`; after this the
    /// infallible conversions below are exact
    fn check_quantities(&self) -> Result<(), QuantityError> {
        let values = self
            .lines
            .iter()
            .map(|l| l.quantity)
            .chain(self.recipes.iter().map(|r| r.quantity_per_unit))
            .chain(self.own_allocations.iter().map(|a| a.quantity))
            .chain(
                self.batches
                    .iter()
                    .flat_map(|b| [b.initial_stock, b.remaining_stock]),
            );
        for value in values {
            try_decimal(value)?;
        }
        Ok(())
    }

    /// (order line, material, quantity) in line order
    fn line_requirements(&self) -> Result<Vec<(i64, i64, Decimal)>, QuantityError> {
        let mut out = Vec::new();
        for line in &self.lines {
            for recipe in self.recipes.iter().filter(|r| r.product_id == line.product_id) {
                let qty = checked_mul(
                    to_decimal(line.quantity),
                    to_decimal(recipe.quantity_per_unit),
                )?;
                out.push((line.id, recipe.material_id, qty));
            }
        }
        Ok(out)
    }

    /// Required quantity per material
    fn requirements(&self) -> Result<BTreeMap<i64, Decimal>, QuantityError> {
        let mut per_material: BTreeMap<i64, Vec<Decimal>> = BTreeMap::new();
        for (_, material_id, qty) in self.line_requirements()? {
            per_material.entry(material_id).or_default().push(qty);
        }
        let mut totals = BTreeMap::new();
        for (material_id, quantities) in per_material {
            totals.insert(material_id, checked_sum(quantities)?);
        }
        Ok(totals)
    }

    /// Whether the held allocations cover exactly what the order needs now,
    /// per (order line, material)
    ///
    /// False after a recipe or line edit, or when nothing is held.
    fn holdings_match(&self) -> Result<bool, QuantityError> {
        if self.own_allocations.is_empty() {
            return Ok(false);
        }
        let mut held: BTreeMap<(Option<i64>, i64), Vec<Decimal>> = BTreeMap::new();
        for a in &self.own_allocations {
            held.entry((a.order_product_id, a.material_id))
                .or_default()
                .push(to_decimal(a.quantity));
        }
        let mut required: BTreeMap<(Option<i64>, i64), Vec<Decimal>> = BTreeMap::new();
        for (line_id, material_id, qty) in self.line_requirements()? {
            // 配方为 0 的物料不分配
            if qty > Decimal::ZERO {
                required.entry((Some(line_id), material_id)).or_default().push(qty);
            }
        }

        if held.len() != required.len() {
            return Ok(false);
        }
        for ((key, held_qty), (required_key, required_qty)) in held.into_iter().zip(required) {
            if key != required_key || checked_sum(held_qty)? != checked_sum(required_qty)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Batches as this order sees them: stock it already holds counts as
    /// available to it
    fn visible_batches(&self) -> Vec<MaterialBatch> {
        let mut batches = self.batches.clone();
        for held in &self.own_allocations {
            if let Some(batch) = batches.iter_mut().find(|b| b.id == held.batch_id) {
                let restored = to_decimal(batch.remaining_stock) + to_decimal(held.quantity);
                batch.remaining_stock = to_f64(restored.min(to_decimal(batch.initial_stock)));
            }
        }
        batches
    }

    /// Classify every material and merge
    fn evaluate(&self) -> AppResult<(ReservationStatus, Vec<MaterialRequirement>)> {
        let requirements = self.requirements()?;
        if requirements.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::OrderHasNoMaterials,
                format!("Order {} has no material requirements", self.order.order_number),
            )
            .with_detail("order_id", self.order.id));
        }

        let visible = self.visible_batches();
        let materials: Vec<MaterialRequirement> = requirements
            .into_iter()
            .map(|(material_id, required)| {
                let batches: Vec<MaterialBatch> = visible
                    .iter()
                    .filter(|b| b.material_id == material_id)
                    .cloned()
                    .collect();
                let received = checked_sum(
                    batches
                        .iter()
                        .filter(|b| b.status == BatchStatus::Received)
                        .map(|b| to_decimal(b.remaining_stock)),
                )?;
                let required = to_f64(required);
                Ok::<_, QuantityError>(MaterialRequirement {
                    material_id,
                    required,
                    received_stock: to_f64(received),
                    status: material_status(&batches, required),
                })
            })
            .collect::<Result<_, _>>()?;

        let status = merge_statuses(materials.iter().map(|m| m.status));
        Ok((status, materials))
    }

    /// FIFO plans per order line, drawn from the received batches in
    /// `working`
    ///
    /// Lines draw in order and `working` is updated as they go, so later
    /// lines see what earlier lines took and the caller ends up with the
    /// batches' stock after the whole booking.
    fn plan_allocations(
        &self,
        working: &mut [MaterialBatch],
    ) -> AppResult<Vec<(i64, AllocationPlan)>> {
        let mut plans = Vec::new();
        for (line_id, material_id, qty) in self.line_requirements()? {
            if qty <= Decimal::ZERO {
                continue;
            }
            let received: Vec<MaterialBatch> = working
                .iter()
                .filter(|b| b.status == BatchStatus::Received)
                .cloned()
                .collect();
            let plan = allocate_material_batches(material_id, to_f64(qty), &received);
            if !plan.is_satisfied() {
                return Err(AppError::with_message(
                    ErrorCode::BatchStockConflict,
                    format!("Received stock of material {material_id} no longer covers the order"),
                )
                .with_detail("material_id", material_id)
                .with_detail("shortfall", plan.shortfall));
            }
            for updated in &plan.updated_batches {
                if let Some(slot) = working.iter_mut().find(|b| b.id == updated.id) {
                    *slot = updated.clone();
                }
            }
            plans.push((line_id, plan));
        }
        Ok(plans)
    }
}

fn order_not_found(order_id: i64) -> AppError {
    AppError::missing(ErrorCode::OrderNotFound, "Order", order_id)
}

/// Write every batch whose stock differs between `before` (as read) and
/// `after` (as computed)
///
/// Each write only lands if the row still holds the value that was read; a
/// miss means another writer got there first and the whole operation fails.
async fn write_batch_stock(
    conn: &mut SqliteConnection,
    order_id: i64,
    before: &[MaterialBatch],
    after: &[MaterialBatch],
) -> AppResult<()> {
    for target in after {
        let Some(read) = before.iter().find(|b| b.id == target.id) else {
            continue;
        };
        if to_decimal(read.remaining_stock) == to_decimal(target.remaining_stock) {
            continue;
        }
        let swapped = material_batch::swap_remaining_stock(
            &mut *conn,
            target.id,
            read.remaining_stock,
            target.remaining_stock,
        )
        .await?;
        if !swapped {
            tracing::warn!(
                order_id,
                batch_id = target.id,
                expected = read.remaining_stock,
                "Batch changed by a concurrent writer, operation rolled back"
            );
            return Err(AppError::with_message(
                ErrorCode::BatchStockConflict,
                format!("Batch {} changed while the order was being booked", target.id),
            )
            .with_detail("batch_id", target.id));
        }
    }
    Ok(())
}

// =============================================================================
// ReservationService
// =============================================================================

#[derive(Clone, Debug)]
pub struct ReservationService {
    pool: SqlitePool,
}

impl ReservationService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Compute the order's material status without writing anything
    pub async fn order_report(&self, order_id: i64) -> AppResult<OrderReservationReport> {
        // read transaction: one consistent view, rolled back on drop
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        let snapshot = Snapshot::load(&mut tx, order_id).await?;
        let (status, materials) = snapshot.evaluate()?;

        Ok(OrderReservationReport {
            order_id,
            order_number: snapshot.order.order_number,
            status,
            parts_status: snapshot.order.parts_status,
            materials,
            allocations: snapshot.own_allocations,
        })
    }

    /// Recompute the order's material status, persist it, and book the
    /// materials when the merged status is `booked`
    ///
    /// Allocations the order already holds are kept while they still match
    /// its requirement per line and material. Otherwise (recipe or line
    /// edited, status no longer `booked`) they are released and, if the order
    /// is still `booked`, planned again, all in the same transaction.
    pub async fn refresh_order_status(&self, order_id: i64) -> AppResult<OrderReservationReport> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        let snapshot = Snapshot::load(&mut tx, order_id).await?;
        let (status, materials) = snapshot.evaluate()?;
        let parts_status = status.to_parts_status();

        order::update_parts_status(&mut *tx, order_id, parts_status).await?;

        let keep = status == ReservationStatus::Booked && snapshot.holdings_match()?;
        let mut released = 0usize;
        let mut booked_now = 0usize;
        if !keep {
            // 先释放旧分配, 库存在 visible_batches 中已加回
            let mut target = snapshot.visible_batches();
            if !snapshot.own_allocations.is_empty() {
                allocation::delete_by_order(&mut *tx, order_id).await?;
                released = snapshot.own_allocations.len();
            }

            if status == ReservationStatus::Booked {
                for (line_id, plan) in snapshot.plan_allocations(&mut target)? {
                    for draw in &plan.allocations {
                        allocation::insert(
                            &mut *tx,
                            &MaterialAllocationCreate {
                                order_id,
                                order_product_id: Some(line_id),
                                material_id: plan.material_id,
                                batch_id: draw.batch_id,
                                quantity: draw.quantity,
                                allocation_type: parts_status,
                            },
                        )
                        .await?;
                        booked_now += 1;
                    }
                }
            }

            write_batch_stock(&mut tx, order_id, &snapshot.batches, &target).await?;
        }

        let allocations = allocation::find_by_order(&mut *tx, order_id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            order_id,
            order_number = %snapshot.order.order_number,
            status = status.as_str(),
            allocations_released = released,
            allocations_created = booked_now,
            "Order material status refreshed"
        );

        Ok(OrderReservationReport {
            order_id,
            order_number: snapshot.order.order_number,
            status,
            parts_status,
            materials,
            allocations,
        })
    }

    /// Release every allocation of an order back to its batches and mark the
    /// order `Not booked`. Returns the number of released allocations.
    ///
    /// Restored stock is capped at the batch's initial stock.
    pub async fn reset_order(&self, order_id: i64) -> AppResult<usize> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        let snapshot = Snapshot::load(&mut tx, order_id).await?;

        let released = snapshot.own_allocations.len();
        if released > 0 {
            write_batch_stock(&mut tx, order_id, &snapshot.batches, &snapshot.visible_batches())
                .await?;
            allocation::delete_by_order(&mut *tx, order_id).await?;
        }
        order::update_parts_status(&mut *tx, order_id, PartsStatus::NotBooked).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(order_id, released, "Order allocations reset");
        Ok(released)
    }

    /// Reset every order, one transaction per order
    ///
    /// A failing order is logged and counted; the rest still run.
    pub async fn reset_all_orders(&self) -> AppResult<ResetTally> {
        let ids = order::find_all_ids(&self.pool).await?;
        let mut tally = ResetTally::default();

        for order_id in ids {
            match self.reset_order(order_id).await {
                Ok(_) => tally.succeeded += 1,
                Err(e) => {
                    tracing::error!(order_id, error = %e, "Failed to reset order allocations");
                    tally.failed += 1;
                    tally.failed_order_ids.push(order_id);
                }
            }
        }

        tracing::info!(
            succeeded = tally.succeeded,
            failed = tally.failed,
            "Bulk allocation reset finished"
        );
        Ok(tally)
    }

    /// What a FIFO draw of `quantity` would take from the material's
    /// received batches right now. Writes nothing.
    pub async fn preview_allocation(
        &self,
        material_id: i64,
        quantity: f64,
    ) -> AppResult<AllocationPlan> {
        material::find_by_id(&self.pool, material_id)
            .await?
            .ok_or_else(|| AppError::missing(ErrorCode::MaterialNotFound, "Material", material_id))?;
        let received: Vec<MaterialBatch> = material_batch::find_by_material(&self.pool, material_id)
            .await?
            .into_iter()
            .filter(|b| b.status == BatchStatus::Received)
            .collect();
        Ok(allocate_material_batches(material_id, quantity, &received))
    }
}
