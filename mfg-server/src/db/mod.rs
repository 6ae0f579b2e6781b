//! Database Module
//!
//! SQLite pool setup and embedded migrations. Table access lives in
//! [`repository`].

pub mod repository;

use crate::utils::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

/// 写冲突时的等待时间
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const FILE_POOL_SIZE: u32 = 5;

/// Owns the SQLite connection pool
#[derive(Clone, Debug)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database file and bring its schema up to date
    ///
    /// WAL journal, `synchronous = NORMAL`, foreign keys on.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let options = parse_options(&format!("sqlite:{db_path}"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .optimize_on_close(true, None);

        let pool = connect(SqlitePoolOptions::new().max_connections(FILE_POOL_SIZE), options).await?;
        tracing::info!(
            path = %db_path,
            busy_timeout_ms = BUSY_TIMEOUT.as_millis() as u64,
            "Database opened (SQLite WAL)"
        );
        Self::with_schema(pool).await
    }

    /// Private in-memory database
    ///
    /// Each connection to `:memory:` is its own empty database, so the pool
    /// is pinned to one connection that is never recycled.
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let pool_options = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        let pool = connect(pool_options, parse_options("sqlite::memory:")?).await?;
        Self::with_schema(pool).await
    }

    async fn with_schema(pool: SqlitePool) -> Result<Self, AppError> {
        // 已删除的旧迁移不报错
        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::debug!("Database migrations applied");
        Ok(Self { pool })
    }
}

fn parse_options(url: &str) -> Result<SqliteConnectOptions, AppError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?;
    Ok(options.foreign_keys(true).busy_timeout(BUSY_TIMEOUT))
}

async fn connect(
    pool_options: SqlitePoolOptions,
    options: SqliteConnectOptions,
) -> Result<SqlitePool, AppError> {
    pool_options
        .connect_with(options)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))
}
