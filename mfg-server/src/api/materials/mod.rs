//! Material API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/materials", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route(
            "/{id}/batches",
            get(handler::list_batches).post(handler::create_batch),
        )
        .route("/{id}/allocation-preview", post(handler::allocation_preview))
}
