//! Shipment API Handlers

use axum::{Json, extract::State};
use shared::models::{Shipment, ShipmentCreate, ShipmentWithLinks};

use crate::core::ServerState;
use crate::db::repository::{order, shipment};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_optional_text};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};

/// GET /api/shipments - 发货单 + 工单号 + 报价号 (单次 JOIN)
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<ShipmentWithLinks>>>> {
    Ok(ok(shipment::find_with_links(&state.pool).await?))
}

/// POST /api/shipments
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ShipmentCreate>,
) -> AppResult<Json<ApiResponse<Shipment>>> {
    validate_optional_text(&payload.carrier, "carrier", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.tracking_number, "tracking_number", MAX_SHORT_TEXT_LEN)?;
    order::find_by_id(&state.pool, payload.order_id)
        .await?
        .ok_or_else(|| AppError::missing(ErrorCode::OrderNotFound, "Order", payload.order_id))?;
    Ok(ok(shipment::create(&state.pool, payload).await?))
}
