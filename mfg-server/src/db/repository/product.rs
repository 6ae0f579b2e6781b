//! Product Repository (catalog products and recipes)

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductMaterial};
use sqlx::{SqliteExecutor, SqlitePool};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, sku, name, price, is_public, is_active FROM product WHERE is_active = 1 ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, sku, name, price, is_public, is_active FROM product WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO product (sku, name, price, is_public) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.sku)
    .bind(&data.name)
    .bind(data.price)
    .bind(data.is_public.unwrap_or(false))
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Replace a product's recipe
pub async fn set_recipe(
    pool: &SqlitePool,
    product_id: i64,
    rows: &[(i64, f64)],
) -> RepoResult<Vec<ProductMaterial>> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM product_material WHERE product_id = ?")
        .bind(product_id)
        .execute(&mut *tx)
        .await?;
    for (material_id, quantity_per_unit) in rows {
        sqlx::query(
            "INSERT INTO product_material (product_id, material_id, quantity_per_unit) VALUES (?, ?, ?)",
        )
        .bind(product_id)
        .bind(material_id)
        .bind(quantity_per_unit)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    find_recipe(pool, product_id).await
}

pub async fn find_recipe(pool: &SqlitePool, product_id: i64) -> RepoResult<Vec<ProductMaterial>> {
    let rows = sqlx::query_as::<_, ProductMaterial>(
        "SELECT product_id, material_id, quantity_per_unit FROM product_material WHERE product_id = ? ORDER BY material_id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Recipe rows of every product on an order
pub async fn find_recipes_for_order(
    executor: impl SqliteExecutor<'_>,
    order_id: i64,
) -> RepoResult<Vec<ProductMaterial>> {
    let rows = sqlx::query_as::<_, ProductMaterial>(
        "SELECT DISTINCT pm.product_id, pm.material_id, pm.quantity_per_unit \
         FROM product_material pm \
         JOIN order_product op ON op.product_id = pm.product_id \
         WHERE op.order_id = ? \
         ORDER BY pm.product_id, pm.material_id",
    )
    .bind(order_id)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}
