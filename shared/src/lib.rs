//! Shared types for the manufacturing backend
//!
//! Types used by the server and by API clients: data models, the unified
//! error system, site configuration and the catalog cart.

pub mod error;
pub mod models;
pub mod site;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
