//! Site config handlers

use axum::{Json, extract::State};
use shared::site::{SiteConfig, SiteConfigUpdate};

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, ok};

/// GET /api/site-config
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<SiteConfig>>> {
    Ok(ok(state.site_config.read().clone()))
}

/// PUT /api/site-config - 部分更新
pub async fn update(
    State(state): State<ServerState>,
    Json(patch): Json<SiteConfigUpdate>,
) -> AppResult<Json<ApiResponse<SiteConfig>>> {
    if let Some(name) = &patch.site_name {
        validate_required_text(name, "site_name", MAX_NAME_LEN)?;
    }
    if let Some(currency) = &patch.currency
        && (currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()))
    {
        return Err(AppError::validation(format!(
            "currency '{currency}' is not a 3-letter code"
        )));
    }
    validate_optional_text(&patch.contact_email, "contact_email", MAX_EMAIL_LEN)?;

    let updated = {
        let mut config = state.site_config.write();
        config.update(patch);
        config.clone()
    };
    tracing::info!(site_name = %updated.site_name, "Site config updated");
    Ok(ok(updated))
}

/// POST /api/site-config/reset - 恢复启动时的配置
pub async fn reset(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<SiteConfig>>> {
    let restored = {
        let mut config = state.site_config.write();
        config.reset();
        config.clone()
    };
    tracing::info!("Site config reset");
    Ok(ok(restored))
}
