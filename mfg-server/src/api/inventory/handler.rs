//! Inventory report handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::{material, material_batch};
use crate::inventory::{AbcItem, AbcThresholds, MaterialValue, classify_abc};
use crate::utils::{ApiResponse, AppResult, ok};

#[derive(Debug, Serialize)]
pub struct AbcReport {
    pub thresholds: AbcThresholds,
    pub total_value: f64,
    pub items: Vec<AbcItem>,
}

/// GET /api/inventory/abc-report
pub async fn abc_report(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<AbcReport>>> {
    let materials = material::find_all(&state.pool).await?;
    let batches = material_batch::find_with_stock(&state.pool).await?;

    let thresholds = state.config.abc_thresholds;
    let items = classify_abc(MaterialValue::from_batches(&materials, &batches)?, thresholds)?;
    let total_value = items.iter().map(|i| i.value).sum::<f64>();

    Ok(ok(AbcReport {
        thresholds,
        total_value,
        items,
    }))
}
