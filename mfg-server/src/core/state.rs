use std::sync::Arc;

use parking_lot::RwLock;
use shared::site::SiteConfig;
use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::services::ReservationService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 连接池实现浅拷贝，clone 成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | 数据库连接池 |
/// | reservations | ReservationService | 物料预留服务 |
/// | site_config | Arc<RwLock<SiteConfig>> | 站点配置 (可更新/重置) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 物料预留服务
    pub reservations: ReservationService,
    /// 站点配置
    pub site_config: Arc<RwLock<SiteConfig>>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("environment", &self.config.environment)
            .field("http_port", &self.config.http_port)
            .finish()
    }
}

impl ServerState {
    /// 用已打开的数据库构造状态
    pub fn new(config: Config, db: DbService) -> Self {
        let site_config = Arc::new(RwLock::new(config.site_config()));
        Self {
            reservations: ReservationService::new(db.pool.clone()),
            pool: db.pool,
            site_config,
            config,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (迁移)
    /// 3. 各服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_file();
        let db_path_str = db_path
            .to_str()
            .ok_or_else(|| ServerError::Config(format!("Non UTF-8 database path: {db_path:?}")))?;
        let db = DbService::new(db_path_str)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self::new(config.clone(), db))
    }

    /// 内存数据库状态 (测试用)
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::open_in_memory()
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        Ok(Self::new(config, db))
    }
}
