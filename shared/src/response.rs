//! API response envelope
//!
//! Every backend endpoint answers with the same wrapper:
//!
//! ```json
//! { "code": 0, "message": "OK", "data": { ... } }
//! ```
//!
//! A non-zero `code` carries an [`ErrorCode`] and optional `details`.

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }

    /// Whether the envelope reports success (missing code counts as success)
    pub fn is_success(&self) -> bool {
        matches!(self.code, None | Some(0))
    }

    /// Unwrap the envelope into its payload or the error it carries
    ///
    /// Unknown codes are reported as [`ErrorCode::Unknown`] keeping the
    /// server's message.
    pub fn into_result(self) -> Result<Option<T>, AppError> {
        if self.is_success() {
            return Ok(self.data);
        }
        let code = self
            .code
            .and_then(|c| ErrorCode::try_from(c).ok())
            .unwrap_or(ErrorCode::Unknown);
        let message = if self.message.is_empty() {
            code.message().to_string()
        } else {
            self.message
        };
        Err(AppError {
            code,
            message,
            details: self.details,
        })
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(42);
        assert!(response.is_success());
        assert_eq!(response.into_result().unwrap(), Some(42));
    }

    #[test]
    fn test_api_response_error_roundtrip() {
        let err = AppError::with_message(ErrorCode::OrderNotFound, "Venta 12 not found")
            .with_detail("id", "12");
        let response = ApiResponse::<()>::error(&err);
        assert_eq!(response.code, Some(4001));
        assert_eq!(response.into_result().unwrap_err(), err);
    }

    #[test]
    fn test_api_response_deserialize_without_code() {
        let json = r#"{"message":"OK","data":[1,2,3]}"#;
        let response: ApiResponse<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_result().unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_api_response_unknown_code() {
        let json = r#"{"code":4242,"message":"odd failure"}"#;
        let response: ApiResponse<i32> = serde_json::from_str(json).unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::Unknown);
        assert_eq!(err.message, "odd failure");
    }

    #[test]
    fn test_api_response_empty_message_uses_default() {
        let json = r#"{"code":6003}"#;
        let response: ApiResponse<i32> = serde_json::from_str(json).unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductOutOfStock);
        assert_eq!(err.message, "Product out of stock");
    }
}
