//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{Product, ProductCreate, ProductMaterial};

use crate::core::ServerState;
use crate::db::repository::{material, product};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_quantity, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};

fn product_not_found(id: i64) -> AppError {
    AppError::missing(ErrorCode::ProductNotFound, "Product", id)
}

/// GET /api/products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    Ok(ok(product::find_all(&state.pool).await?))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product = product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(ok(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    validate_required_text(&payload.sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_quantity(payload.price, "price")?;
    let product = product::create(&state.pool, payload).await?;
    Ok(ok(product))
}

/// GET /api/products/:id/materials - 配方
pub async fn get_recipe(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<ProductMaterial>>>> {
    product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;
    Ok(ok(product::find_recipe(&state.pool, id).await?))
}

#[derive(Debug, Deserialize)]
pub struct RecipeRow {
    pub material_id: i64,
    pub quantity_per_unit: f64,
}

/// PUT /api/products/:id/materials - 替换配方
pub async fn set_recipe(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(rows): Json<Vec<RecipeRow>>,
) -> AppResult<Json<ApiResponse<Vec<ProductMaterial>>>> {
    product::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| product_not_found(id))?;

    let mut seen = std::collections::HashSet::new();
    for row in &rows {
        validate_quantity(row.quantity_per_unit, "quantity_per_unit")?;
        if row.quantity_per_unit == 0.0 {
            return Err(AppError::validation("quantity_per_unit must be greater than 0"));
        }
        if !seen.insert(row.material_id) {
            return Err(AppError::validation(format!(
                "material {} listed twice",
                row.material_id
            )));
        }
        material::find_by_id(&state.pool, row.material_id)
            .await?
            .ok_or_else(|| AppError::missing(ErrorCode::MaterialNotFound, "Material", row.material_id))?;
    }

    let pairs: Vec<(i64, f64)> = rows
        .iter()
        .map(|r| (r.material_id, r.quantity_per_unit))
        .collect();
    let recipe = product::set_recipe(&state.pool, id, &pairs).await?;
    tracing::info!(product_id = id, rows = recipe.len(), "Product recipe replaced");
    Ok(ok(recipe))
}
