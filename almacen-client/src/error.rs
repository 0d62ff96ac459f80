//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Session credential expired before the request was sent
    #[error("Session expired")]
    CredentialExpired,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error envelope returned by the server
    #[error("{0}")]
    Api(AppError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        match err {
            ClientError::Api(e) => e,
            ClientError::Http(e) if e.is_timeout() => AppError::with_message(ErrorCode::TimeoutError, message),
            ClientError::Http(e) if e.is_decode() => AppError::with_message(ErrorCode::InvalidFormat, message),
            ClientError::Http(_) => AppError::network(message),
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                AppError::with_message(ErrorCode::InvalidFormat, message)
            }
            ClientError::Unauthorized => AppError::with_message(ErrorCode::NotAuthenticated, message),
            ClientError::CredentialExpired => AppError::with_message(ErrorCode::TokenExpired, message),
            ClientError::Forbidden(_) => AppError::with_message(ErrorCode::PermissionDenied, message),
            ClientError::NotFound(_) => AppError::with_message(ErrorCode::NotFound, message),
            ClientError::Validation(_) => AppError::with_message(ErrorCode::ValidationFailed, message),
            ClientError::Internal(_) => AppError::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_app_error() {
        let app: AppError = ClientError::CredentialExpired.into();
        assert_eq!(app.code, ErrorCode::TokenExpired);

        let app: AppError = ClientError::NotFound("venta V-1".into()).into();
        assert_eq!(app.code, ErrorCode::NotFound);
        assert_eq!(app.message, "Not found: venta V-1");

        let envelope = AppError::with_message(ErrorCode::ProductOutOfStock, "sin stock");
        let app: AppError = ClientError::Api(envelope.clone()).into();
        assert_eq!(app, envelope);
    }
}
