//! Manufacturing operations server
//!
//! # 架构概述
//!
//! 报价到收款 (RFQ → Quote → Work Order → Shipment) 的后端服务，核心是
//! 工单物料状态汇总与 FIFO 批次预留：
//!
//! - **数据库** (`db`): SQLite (sqlx) 连接池、迁移、按表的仓储函数
//! - **库存计算** (`inventory`): FIFO 分配、物料状态分类、ABC 分类 (纯函数)
//! - **服务** (`services`): 单快照 + 单事务的预留/重置编排
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! mfg-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 连接池与仓储
//! ├── inventory/     # 分配与分类算法
//! ├── services/      # 预留编排
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由汇总与中间件
//! ├── server/        # 请求日志中间件
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod inventory;
pub mod routes;
pub mod server;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use services::ReservationService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Days of rolled log files kept on startup
const LOG_RETENTION_DAYS: u64 = 30;

/// 设置运行环境: 加载 .env、创建工作目录、初始化日志
pub fn setup_environment() -> Result<Config, core::ServerError> {
    // .env 不存在时忽略
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let logs_dir = config.logs_dir();
    let log_dir = logs_dir.to_str();
    init_logger_with_file(Some(&config.log_level), Some(config.log_json), log_dir);

    if let Some(dir) = log_dir {
        match cleanup_old_logs(dir, LOG_RETENTION_DAYS) {
            Ok(0) => {}
            Ok(n) => tracing::info!(removed = n, "Old log files removed"),
            Err(e) => tracing::warn!(error = %e, "Failed to clean up old logs"),
        }
    }

    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    __  ___ ____ ______
   /  |/  // __// ____/
  / /|_/ // /_ / / __
 / /  / // __// /_/ /
/_/  /_//_/   \____/
    "#
    );
}
