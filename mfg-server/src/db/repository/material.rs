//! Material Repository

use super::{RepoError, RepoResult};
use shared::models::{Material, MaterialCreate, MaterialUpdate};
use shared::util::now_millis;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, name, unit, vendor, category, is_active, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Material>> {
    let materials = sqlx::query_as::<_, Material>(&format!(
        "SELECT {COLUMNS} FROM material WHERE is_active = 1 ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(materials)
}

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Material>> {
    let material =
        sqlx::query_as::<_, Material>(&format!("SELECT {COLUMNS} FROM material WHERE id = ?"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
    Ok(material)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Material>> {
    let material = sqlx::query_as::<_, Material>(&format!(
        "SELECT {COLUMNS} FROM material WHERE name = ? LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(material)
}

pub async fn create(pool: &SqlitePool, data: MaterialCreate) -> RepoResult<Material> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO material (name, unit, vendor, category, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.unit)
    .bind(&data.vendor)
    .bind(&data.category)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create material".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MaterialUpdate) -> RepoResult<Material> {
    let rows = sqlx::query(
        "UPDATE material SET name = COALESCE(?1, name), unit = COALESCE(?2, unit), vendor = COALESCE(?3, vendor), category = COALESCE(?4, category), is_active = COALESCE(?5, is_active) WHERE id = ?6",
    )
    .bind(data.name)
    .bind(data.unit)
    .bind(data.vendor)
    .bind(data.category)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Material {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Material {id} not found")))
}
