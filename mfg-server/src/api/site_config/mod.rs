//! Site config API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/site-config", get(handler::get).put(handler::update))
        .route("/api/site-config/reset", post(handler::reset))
}
