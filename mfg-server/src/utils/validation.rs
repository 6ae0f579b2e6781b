//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: material, product, customer, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: unit, SKU, order/quote numbers, currency, tracking numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Quantity limits ─────────────────────────────────────────────────

/// Upper bound for stock, costs and quantities
///
/// Keeps every product of two stored values (line quantity × quantity per
/// unit, stock × cost) well inside `Decimal` range. Mirrored by the schema
/// CHECK constraints.
pub const MAX_QUANTITY: f64 = 1e12;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

// ── Validation helpers (quantities) ─────────────────────────────────

/// Validate a finite, non-negative quantity no larger than [`MAX_QUANTITY`].
pub fn validate_quantity(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    if value > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must not exceed {MAX_QUANTITY}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Steel sheet", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(validate_required_text(&"x".repeat(MAX_NAME_LEN + 1), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "vendor", MAX_NAME_LEN).is_ok());
        assert!(validate_optional_text(&Some("a".repeat(300)), "vendor", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_quantity() {
        assert!(validate_quantity(0.0, "quantity").is_ok());
        assert!(validate_quantity(2.5, "quantity").is_ok());
        assert!(validate_quantity(-1.0, "quantity").is_err());
        assert!(validate_quantity(f64::INFINITY, "quantity").is_err());
        assert!(validate_quantity(f64::NAN, "quantity").is_err());
    }

    #[test]
    fn test_quantity_upper_bound() {
        assert!(validate_quantity(MAX_QUANTITY, "initial_stock").is_ok());
        let err = validate_quantity(1e15, "initial_stock").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        assert_eq!(err.details.unwrap()["field"], "initial_stock");
    }
}
