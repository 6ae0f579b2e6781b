//! Material Model

use serde::{Deserialize, Serialize};

/// Material entity (原材料：板材、紧固件、涂料等)
///
/// Reference data owned by the catalog; allocation only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Material {
    pub id: i64,
    pub name: String,
    /// Unit of measure (kg, m, pcs, ...)
    pub unit: String,
    pub vendor: Option<String>,
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create material payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCreate {
    pub name: String,
    pub unit: String,
    pub vendor: Option<String>,
    pub category: Option<String>,
}

/// Update material payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub vendor: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}
