//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`materials`] - 物料与批次、FIFO 预览
//! - [`products`] - 商品与配方 (BOM)
//! - [`quotes`] - 报价
//! - [`orders`] - 工单、物料状态、预留重置
//! - [`shipments`] - 发货 (关联工单与报价)
//! - [`inventory`] - 库存报表 (ABC 分类)
//! - [`site_config`] - 站点配置

pub mod health;
pub mod inventory;
pub mod materials;
pub mod orders;
pub mod products;
pub mod quotes;
pub mod shipments;
pub mod site_config;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
