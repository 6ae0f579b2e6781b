//! Unified error codes
//!
//! Error codes are shared by the server and API consumers and are organized
//! by category:
//! - 0xxx: General errors
//! - 1xxx: Inventory errors (materials, batches, allocations)
//! - 2xxx: Order errors
//! - 3xxx: Fulfillment errors (quotes, shipments)
//! - 4xxx: Catalog errors (products, cart)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for compact serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Inventory ====================
    /// Material not found
    MaterialNotFound = 1001,
    /// Material name already exists
    MaterialNameExists = 1002,
    /// Material still referenced by batches or recipes
    MaterialInUse = 1003,
    /// Material batch not found
    BatchNotFound = 1101,
    /// Batch stock would violate 0 <= remaining <= initial
    BatchStockInvalid = 1102,
    /// Batch no longer holds the quantity being drawn
    BatchStockConflict = 1103,
    /// Allocation record not found
    AllocationNotFound = 1201,

    // ==================== 2xxx: Order ====================
    /// Order not found
    OrderNotFound = 2001,
    /// Order line item not found
    OrderItemNotFound = 2002,
    /// Order already holds material allocations
    OrderAlreadyAllocated = 2003,
    /// Order requires no materials
    OrderHasNoMaterials = 2004,

    // ==================== 3xxx: Fulfillment ====================
    /// Quote not found
    QuoteNotFound = 3001,
    /// Shipment not found
    ShipmentNotFound = 3101,

    // ==================== 4xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 4001,
    /// Cart item not found
    CartItemNotFound = 4002,
    /// Invalid quantity
    InvalidQuantity = 4003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timed out
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Inventory
            ErrorCode::MaterialNotFound => "Material not found",
            ErrorCode::MaterialNameExists => "Material name already exists",
            ErrorCode::MaterialInUse => "Material is referenced by batches or recipes",
            ErrorCode::BatchNotFound => "Material batch not found",
            ErrorCode::BatchStockInvalid => "Batch stock must satisfy 0 <= remaining <= initial",
            ErrorCode::BatchStockConflict => "Batch stock changed while allocating",
            ErrorCode::AllocationNotFound => "Material allocation not found",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::OrderAlreadyAllocated => "Order already holds material allocations",
            ErrorCode::OrderHasNoMaterials => "Order requires no materials",

            // Fulfillment
            ErrorCode::QuoteNotFound => "Quote not found",
            ErrorCode::ShipmentNotFound => "Shipment not found",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::CartItemNotFound => "Cart item not found",
            ErrorCode::InvalidQuantity => "Quantity must be a positive number",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Inventory
            1001 => Ok(ErrorCode::MaterialNotFound),
            1002 => Ok(ErrorCode::MaterialNameExists),
            1003 => Ok(ErrorCode::MaterialInUse),
            1101 => Ok(ErrorCode::BatchNotFound),
            1102 => Ok(ErrorCode::BatchStockInvalid),
            1103 => Ok(ErrorCode::BatchStockConflict),
            1201 => Ok(ErrorCode::AllocationNotFound),

            // Order
            2001 => Ok(ErrorCode::OrderNotFound),
            2002 => Ok(ErrorCode::OrderItemNotFound),
            2003 => Ok(ErrorCode::OrderAlreadyAllocated),
            2004 => Ok(ErrorCode::OrderHasNoMaterials),

            // Fulfillment
            3001 => Ok(ErrorCode::QuoteNotFound),
            3101 => Ok(ErrorCode::ShipmentNotFound),

            // Catalog
            4001 => Ok(ErrorCode::ProductNotFound),
            4002 => Ok(ErrorCode::CartItemNotFound),
            4003 => Ok(ErrorCode::InvalidQuantity),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
