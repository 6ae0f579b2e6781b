//! AppError and the response envelope

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned by handlers and services
///
/// `code` decides the HTTP status, `details` carries the ids and quantities
/// a client needs to act on it (which batch, how much was short, ...).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// `<entity> <id> not found`, with the id in `details`
    ///
    /// ```
    /// use shared::error::{AppError, ErrorCode};
    /// let err = AppError::missing(ErrorCode::OrderNotFound, "Order", 42);
    /// assert_eq!(err.message, "Order 42 not found");
    /// ```
    pub fn missing(code: ErrorCode, entity: &str, id: i64) -> Self {
        Self::with_message(code, format!("{entity} {id} not found")).with_detail("id", id)
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// JSON envelope of every API response
///
/// `code` is 0 on success; on failure it is the [`ErrorCode`] and `details`
/// is copied from the error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::success_with_message("OK", data)
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: Some(0),
            message: message.into(),
            data: Some(data),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.code, None | Some(0))
    }
}

impl ApiResponse<()> {
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self.code.category() {
            ErrorCategory::System => tracing::error!(
                code = %self.code,
                message = %self.message,
                "Request failed with system error"
            ),
            // 库存冲突需要排查并发写入
            ErrorCategory::Inventory if self.code == ErrorCode::BatchStockConflict => {
                tracing::warn!(code = %self.code, message = %self.message, "Stock conflict")
            }
            _ => {}
        }

        let status = self.http_status();
        (status, axum::Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            None | Some(0) => StatusCode::OK,
            Some(code) => ErrorCode::try_from(code)
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entity() {
        let err = AppError::missing(ErrorCode::MaterialNotFound, "Material", 7);
        assert_eq!(err.message, "Material 7 not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.details.unwrap()["id"], 7);
    }

    #[test]
    fn test_default_message() {
        let err = AppError::new(ErrorCode::OrderHasNoMaterials);
        assert_eq!(err.message, ErrorCode::OrderHasNoMaterials.message());
        assert!(err.details.is_none());
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::with_message(ErrorCode::BatchStockConflict, "Batch 3 drained")
            .with_detail("batch_id", 3)
            .with_detail("shortfall", 1.5);
        let details = err.details.as_ref().unwrap();
        assert_eq!(details["batch_id"], 3);
        assert_eq!(details["shortfall"], 1.5);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_envelope() {
        let err = AppError::validation("unit is required").with_detail("field", "unit");
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(json["code"], ErrorCode::ValidationFailed.code());
        assert_eq!(json["message"], "unit is required");
        assert_eq!(json["details"]["field"], "unit");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::success(vec![1, 2]);
        assert!(response.is_success());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["message"], "OK");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_envelope_round_trip_from_client_side() {
        let body = r#"{"code":1001,"message":"Material 9 not found","details":{"id":9}}"#;
        let response: ApiResponse<serde_json::Value> = serde_json::from_str(body).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.code, Some(ErrorCode::MaterialNotFound.code()));
    }
}
