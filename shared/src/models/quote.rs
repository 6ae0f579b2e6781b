//! Quote Model

use serde::{Deserialize, Serialize};

/// Quote status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
}

/// Quote entity, answered to a customer RFQ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Quote {
    pub id: i64,
    pub quote_number: String,
    pub customer: String,
    /// Customer's RFQ reference
    pub rfq_reference: Option<String>,
    pub total: f64,
    pub status: QuoteStatus,
    pub created_at: i64,
}

/// Create quote payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteCreate {
    pub quote_number: String,
    pub customer: String,
    pub rfq_reference: Option<String>,
    pub total: f64,
}
