//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{Order, OrderCreate, OrderProduct};

use crate::core::ServerState;
use crate::db::repository::{order, product, quote};
use crate::services::{OrderReservationReport, ResetTally};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_quantity, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok, ok_with_message};

/// Order with its line items
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderProduct>,
}

#[derive(Debug, Serialize)]
pub struct ResetResult {
    pub order_id: i64,
    pub released: usize,
}

/// GET /api/orders
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    Ok(ok(order::find_all(&state.pool).await?))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let order = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::missing(ErrorCode::OrderNotFound, "Order", id))?;
    let lines = order::find_lines(&state.pool, id).await?;
    Ok(ok(OrderDetail { order, lines }))
}

/// POST /api/orders - 创建工单 (可选关联报价)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    validate_required_text(&payload.order_number, "order_number", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.customer, "customer", MAX_NAME_LEN)?;
    if payload.lines.is_empty() {
        return Err(AppError::validation("order must have at least one line"));
    }
    for line in &payload.lines {
        if !line.quantity.is_finite() || line.quantity <= 0.0 {
            return Err(AppError::with_message(
                ErrorCode::InvalidQuantity,
                format!("quantity for product {} must be greater than 0", line.product_id),
            ));
        }
        validate_quantity(line.quantity, "quantity")?;
        product::find_by_id(&state.pool, line.product_id)
            .await?
            .ok_or_else(|| AppError::missing(ErrorCode::ProductNotFound, "Product", line.product_id))?;
    }
    if let Some(quote_id) = payload.quote_id {
        quote::find_by_id(&state.pool, quote_id)
            .await?
            .ok_or_else(|| {
                AppError::missing(ErrorCode::QuoteNotFound, "Quote", quote_id)
            })?;
    }

    let order = order::create(&state.pool, payload).await?;
    let lines = order::find_lines(&state.pool, order.id).await?;
    tracing::info!(order_id = order.id, order_number = %order.order_number, "Order created");
    Ok(ok(OrderDetail { order, lines }))
}

/// GET /api/orders/:id/material-status - 物料状态 (不写库)
pub async fn material_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderReservationReport>>> {
    Ok(ok(state.reservations.order_report(id).await?))
}

/// POST /api/orders/:id/material-status/refresh
pub async fn refresh_material_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<OrderReservationReport>>> {
    Ok(ok(state.reservations.refresh_order_status(id).await?))
}

/// POST /api/orders/:id/reset-allocations
pub async fn reset(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<ResetResult>>> {
    let released = state.reservations.reset_order(id).await?;
    Ok(ok(ResetResult {
        order_id: id,
        released,
    }))
}

/// POST /api/orders/reset-allocations - 批量重置, 返回成功/失败统计
pub async fn reset_all(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<ResetTally>>> {
    let tally = state.reservations.reset_all_orders().await?;
    let message = format!("{} reset, {} failed", tally.succeeded, tally.failed);
    Ok(ok_with_message(tally, message))
}
