//! Material API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{Material, MaterialBatch, MaterialBatchCreate, MaterialCreate, MaterialUpdate};
use shared::util::date_to_millis;

use crate::core::ServerState;
use crate::db::repository::material_batch::NewBatch;
use crate::db::repository::{material, material_batch};
use crate::inventory::AllocationPlan;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_quantity,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};

fn material_not_found(id: i64) -> AppError {
    AppError::missing(ErrorCode::MaterialNotFound, "Material", id)
}

/// GET /api/materials - 获取所有物料
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Material>>>> {
    let materials = material::find_all(&state.pool).await?;
    Ok(ok(materials))
}

/// GET /api/materials/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Material>>> {
    let material = material::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| material_not_found(id))?;
    Ok(ok(material))
}

/// POST /api/materials - 创建物料
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MaterialCreate>,
) -> AppResult<Json<ApiResponse<Material>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.vendor, "vendor", MAX_NAME_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_NAME_LEN)?;

    if material::find_by_name(&state.pool, &payload.name).await?.is_some() {
        return Err(AppError::with_message(
            ErrorCode::MaterialNameExists,
            format!("Material '{}' already exists", payload.name),
        ));
    }

    let material = material::create(&state.pool, payload).await?;
    tracing::info!(material_id = material.id, name = %material.name, "Material created");
    Ok(ok(material))
}

/// PUT /api/materials/:id - 更新物料
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MaterialUpdate>,
) -> AppResult<Json<ApiResponse<Material>>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(unit) = &payload.unit {
        validate_required_text(unit, "unit", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.vendor, "vendor", MAX_NAME_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_NAME_LEN)?;

    material::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| material_not_found(id))?;
    let material = material::update(&state.pool, id, payload).await?;
    Ok(ok(material))
}

/// GET /api/materials/:id/batches - 批次列表 (FIFO 顺序)
pub async fn list_batches(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<MaterialBatch>>>> {
    material::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| material_not_found(id))?;
    let batches = material_batch::find_by_material(&state.pool, id).await?;
    Ok(ok(batches))
}

/// POST /api/materials/:id/batches - 登记采购/在途批次
pub async fn create_batch(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MaterialBatchCreate>,
) -> AppResult<Json<ApiResponse<MaterialBatch>>> {
    material::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| material_not_found(id))?;

    validate_quantity(payload.initial_stock, "initial_stock")?;
    validate_quantity(payload.cost_per_unit, "cost_per_unit")?;
    let remaining = payload.remaining_stock.unwrap_or(payload.initial_stock);
    if !shared::models::stock_is_valid(payload.initial_stock, remaining) {
        return Err(AppError::with_message(
            ErrorCode::BatchStockInvalid,
            format!(
                "remaining_stock {remaining} must be between 0 and initial_stock {}",
                payload.initial_stock
            ),
        ));
    }
    let purchase_date = date_to_millis(&payload.purchase_date).ok_or_else(|| {
        AppError::validation(format!(
            "purchase_date '{}' is not a YYYY-MM-DD date",
            payload.purchase_date
        ))
    })?;

    let batch = material_batch::create(
        &state.pool,
        NewBatch {
            material_id: id,
            initial_stock: payload.initial_stock,
            remaining_stock: remaining,
            cost_per_unit: payload.cost_per_unit,
            purchase_date,
            status: payload.status,
        },
    )
    .await?;
    tracing::info!(
        material_id = id,
        batch_id = batch.id,
        status = batch.status.as_str(),
        initial_stock = batch.initial_stock,
        "Material batch recorded"
    );
    Ok(ok(batch))
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub quantity: f64,
}

/// POST /api/materials/:id/allocation-preview - FIFO 预览 (不写库)
pub async fn allocation_preview(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PreviewRequest>,
) -> AppResult<Json<ApiResponse<AllocationPlan>>> {
    validate_quantity(payload.quantity, "quantity")?;
    let plan = state.reservations.preview_allocation(id, payload.quantity).await?;
    Ok(ok(plan))
}
