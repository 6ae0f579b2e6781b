//! 请求日志中间件
//!
//! 每个请求结束时记录一行: 请求 ID、方法、路由模板、状态码、耗时。
//! 健康检查只在 debug 级别输出, 避免探针刷屏。

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use http::StatusCode;
use std::time::Instant;
use tower_http::request_id::RequestId;

const HEALTH_PATH: &str = "/health";

/// 请求日志中间件
///
/// 请求 ID 由外层 `SetRequestIdLayer` 写入扩展; 直接调用时回退到请求头。
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .or_else(|| req.headers().get("x-request-id").and_then(|v| v.to_str().ok()))
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    // 使用路由模板 (/api/orders/{id}) 而非原始路径, 便于聚合
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    tracing::debug!(request_id = %request_id, method = %method, route = %route, "Request started");

    let response = next.run(req).await;
    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;

    match classify(&route, status) {
        Outcome::Probe => tracing::debug!(
            request_id = %request_id,
            status = status.as_u16(),
            latency_ms,
            "Health probe"
        ),
        Outcome::Ok => tracing::info!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            latency_ms,
            "Request completed"
        ),
        Outcome::Rejected => tracing::warn!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            latency_ms,
            "Request rejected"
        ),
        Outcome::Failed => tracing::error!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            latency_ms,
            "Request failed"
        ),
    }

    response
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Probe,
    Ok,
    Rejected,
    Failed,
}

fn classify(route: &str, status: StatusCode) -> Outcome {
    if status.is_server_error() {
        Outcome::Failed
    } else if route == HEALTH_PATH {
        Outcome::Probe
    } else if status.is_client_error() {
        Outcome::Rejected
    } else {
        Outcome::Ok
    }
}
