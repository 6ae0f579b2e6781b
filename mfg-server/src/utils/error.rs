//! 统一错误处理
//!
//! 错误类型来自 `shared::error`，这里只补充响应辅助函数。
//!
//! # 错误码规范
//!
//! | 范围 | 分类 | 示例 |
//! |------|------|------|
//! | 0xxx | 通用错误 | 2 验证失败 |
//! | 1xxx | 库存 | 1001 物料不存在 |
//! | 2xxx | 订单 | 2003 订单已预留 |
//! | 3xxx | 报价/发货 | 3101 发货单不存在 |
//! | 4xxx | 目录/购物车 | 4001 商品不存在 |
//! | 9xxx | 系统错误 | 9002 数据库错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::missing(ErrorCode::MaterialNotFound, "Material", 7))
//!
//! // 返回成功响应
//! Ok(ok(material))
//! ```

use axum::Json;
use serde::Serialize;

pub use super::result::AppResult;
pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_with_message(message, data))
}
