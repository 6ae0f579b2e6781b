//! Data models
//!
//! Shared between mfg-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod allocation;
pub mod material;
pub mod material_batch;
pub mod order;
pub mod product;
pub mod quote;
pub mod shipment;

// Re-exports
pub use allocation::*;
pub use material::*;
pub use material_batch::*;
pub use order::*;
pub use product::*;
pub use quote::*;
pub use shipment::*;
