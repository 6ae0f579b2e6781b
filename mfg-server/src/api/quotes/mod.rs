//! Quote API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/quotes", post(handler::create))
        .route("/api/quotes/{id}", get(handler::get_by_id))
}
