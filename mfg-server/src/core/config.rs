use std::path::PathBuf;

use crate::inventory::AbcThresholds;
use shared::site::SiteConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/mfg | 工作目录 |
/// | DATABASE_PATH | {WORK_DIR}/database/mfg.db | SQLite 数据库文件 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | {WORK_DIR}/logs | 日志目录 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | ABC_A_THRESHOLD | 0.80 | A 类累计占比上限 |
/// | ABC_B_THRESHOLD | 0.95 | B 类累计占比上限 |
/// | SITE_NAME | Workshop | 站点名称 |
/// | SITE_CURRENCY | EUR | 目录货币 |
/// | SITE_CONTACT_EMAIL | - | 联系邮箱 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/mfg HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// 数据库文件路径 (未设置时位于 work_dir/database)
    pub database_path: Option<String>,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// ABC 分类阈值
    pub abc_thresholds: AbcThresholds,
    /// 站点配置初始值 (reset 时恢复)
    pub site_name: String,
    pub site_currency: String,
    pub site_contact_email: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let defaults = AbcThresholds::default();
        let thresholds = AbcThresholds {
            a: std::env::var("ABC_A_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.a),
            b: std::env::var("ABC_B_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.b),
        };
        let abc_thresholds = if thresholds.is_valid() {
            thresholds
        } else {
            tracing::warn!(?thresholds, "Invalid ABC thresholds, using defaults");
            defaults
        };

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/mfg".into()),
            database_path: std::env::var("DATABASE_PATH").ok(),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            abc_thresholds,
            site_name: std::env::var("SITE_NAME").unwrap_or_else(|_| "Workshop".into()),
            site_currency: std::env::var("SITE_CURRENCY").unwrap_or_else(|_| "EUR".into()),
            site_contact_email: std::env::var("SITE_CONTACT_EMAIL").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = None;
        config.http_port = http_port;
        config
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 数据库文件
    pub fn database_file(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => self.database_dir().join("mfg.db"),
        }
    }

    /// 日志目录
    pub fn logs_dir(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(&self.work_dir).join("logs"),
        }
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        if let Some(parent) = self.database_file().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    /// 站点配置初始值
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig::new(
            self.site_name.clone(),
            self.site_currency.clone(),
            self.site_contact_email.clone(),
        )
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_and_paths() {
        let config = Config::with_overrides("/tmp/mfg-test", 4100);
        assert_eq!(config.http_port, 4100);
        assert_eq!(
            config.database_file(),
            PathBuf::from("/tmp/mfg-test/database/mfg.db")
        );
        assert!(config.abc_thresholds.is_valid());
    }

    #[test]
    fn test_explicit_database_path() {
        let mut config = Config::with_overrides("/tmp/mfg-test", 4100);
        config.database_path = Some("/srv/data/plant.db".into());
        assert_eq!(config.database_file(), PathBuf::from("/srv/data/plant.db"));
    }
}
