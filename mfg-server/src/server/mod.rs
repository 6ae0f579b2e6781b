//! HTTP 服务器组件
//!
//! - [`middleware`] - 请求日志中间件

pub mod middleware;
