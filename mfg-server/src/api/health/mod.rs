//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 存活 + 数据库探测 (含已应用的迁移版本) |
//!
//! ```json
//! { "status": "healthy", "version": "0.1.0", "environment": "development",
//!   "database": { "status": "ok", "latency_ms": 0, "schema_version": 1 } }
//! ```

use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// healthy | degraded
    status: &'static str,
    version: &'static str,
    environment: String,
    database: DatabaseCheck,
}

#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    /// ok | error
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    /// Highest applied migration
    #[serde(skip_serializing_if = "Option::is_none")]
    schema_version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

async fn probe_database(state: &ServerState) -> DatabaseCheck {
    let started = Instant::now();
    let version = sqlx::query_scalar::<_, Option<i64>>(
        "SELECT MAX(version) FROM _sqlx_migrations WHERE success = 1",
    )
    .fetch_one(&state.pool)
    .await;

    match version {
        Ok(schema_version) => DatabaseCheck {
            status: "ok",
            latency_ms: Some(started.elapsed().as_millis() as u64),
            schema_version,
            message: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database health probe failed");
            DatabaseCheck {
                status: "error",
                latency_ms: None,
                schema_version: None,
                message: Some(format!("Database error: {e}")),
            }
        }
    }
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = probe_database(&state).await;
    Json(HealthResponse {
        status: if database.status == "ok" { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        database,
    })
}
