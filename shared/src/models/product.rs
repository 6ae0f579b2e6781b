//! Product Model (catalog products and their recipes)

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    /// Catalog list price in currency unit
    pub price: f64,
    /// Shown in the public catalog
    pub is_public: bool,
    pub is_active: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub is_public: Option<bool>,
}

/// Recipe / bill-of-materials row: how much of a material one unit of the
/// product consumes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductMaterial {
    pub product_id: i64,
    pub material_id: i64,
    pub quantity_per_unit: f64,
}
