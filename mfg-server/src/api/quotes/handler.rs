//! Quote API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Quote, QuoteCreate};

use crate::core::ServerState;
use crate::db::repository::quote;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_quantity,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};

/// GET /api/quotes/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Quote>>> {
    let quote = quote::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::missing(ErrorCode::QuoteNotFound, "Quote", id))?;
    Ok(ok(quote))
}

/// POST /api/quotes
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<QuoteCreate>,
) -> AppResult<Json<ApiResponse<Quote>>> {
    validate_required_text(&payload.quote_number, "quote_number", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.customer, "customer", MAX_NAME_LEN)?;
    validate_optional_text(&payload.rfq_reference, "rfq_reference", MAX_SHORT_TEXT_LEN)?;
    validate_quantity(payload.total, "total")?;
    Ok(ok(quote::create(&state.pool, payload).await?))
}
