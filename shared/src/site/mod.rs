//! Site-level value types
//!
//! Explicitly owned state that the caller passes around:
//! - [`SiteConfig`]: storefront settings with patch/reset
//! - [`Cart`]: public catalog cart

mod cart;
mod config;

pub use cart::{Cart, CartItem};
pub use config::{SiteConfig, SiteConfigUpdate};
