//! Order API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | GET / POST | 工单列表 / 创建 |
//! | /api/orders/{id}/material-status | GET | 物料状态 (只读) |
//! | /api/orders/{id}/material-status/refresh | POST | 重新计算并在 booked 时预留 |
//! | /api/orders/{id}/reset-allocations | POST | 释放单个工单预留 |
//! | /api/orders/reset-allocations | POST | 释放全部工单预留 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/reset-allocations", post(handler::reset_all))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/material-status", get(handler::material_status))
        .route(
            "/{id}/material-status/refresh",
            post(handler::refresh_material_status),
        )
        .route("/{id}/reset-allocations", post(handler::reset))
}
