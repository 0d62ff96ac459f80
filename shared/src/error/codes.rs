//! Unified error codes for the Almacen workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order (venta) errors
//! - 5xxx: Payment errors
//! - 6xxx: Product / stock errors
//! - 7xxx: Client errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as `u16` on the wire so the UI can localise messages
/// without parsing strings.
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

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order already completed
    OrderAlreadyCompleted = 4003,
    /// Order already cancelled
    OrderAlreadyCancelled = 4004,
    /// Cart line not found
    OrderItemNotFound = 4006,
    /// Order has no lines
    OrderEmpty = 4007,
    /// Transition not allowed from the current state
    InvalidTransition = 4008,
    /// Order requires a client before completion
    ClientRequired = 4009,
    /// Invalid quantity, price or discount on a line
    InvalidLineInput = 4010,
    /// Exchange rate must be positive
    InvalidExchangeRate = 4011,

    // ==================== 5xxx: Payment ====================
    /// Payment failed
    PaymentFailed = 5001,
    /// Tendered amount is insufficient
    PaymentInsufficientAmount = 5002,
    /// Invalid payment method
    PaymentInvalidMethod = 5003,
    /// Payment exceeds the outstanding balance
    PaymentExceedsBalance = 5006,
    /// Installment schedule is malformed
    InvalidSchedule = 5007,
    /// Outstanding balance is inconsistent with the total
    InconsistentBalance = 5008,
    /// Split payment does not add up to the total
    SplitPaymentMismatch = 5009,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Invalid product price
    ProductInvalidPrice = 6002,
    /// Product has no stock
    ProductOutOfStock = 6003,
    /// Requested quantity capped at available stock
    StockCapReached = 6004,
    /// Product at or below its reorder threshold
    LowStock = 6005,

    // ==================== 7xxx: Client ====================
    /// Client not found
    ClientNotFound = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Network error
    NetworkError = 9002,
    /// Request timed out
    TimeoutError = 9003,
    /// Remote service unavailable
    ServiceUnavailable = 9004,
    /// Response arrived for a view that was already discarded
    StaleResponse = 9005,
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
        matches!(self, Self::Success)
    }

    /// Default human-readable message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            // Auth
            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Invalid token",
            Self::SessionExpired => "Session has expired",

            // Permission
            Self::PermissionDenied => "Permission denied",

            // Order
            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyCompleted => "Order already completed",
            Self::OrderAlreadyCancelled => "Order already cancelled",
            Self::OrderItemNotFound => "Order line not found",
            Self::OrderEmpty => "Order has no lines",
            Self::InvalidTransition => "Transition not allowed in the current order state",
            Self::ClientRequired => "A client is required",
            Self::InvalidLineInput => "Invalid quantity, price or discount",
            Self::InvalidExchangeRate => "Exchange rate must be greater than zero",

            // Payment
            Self::PaymentFailed => "Payment failed",
            Self::PaymentInsufficientAmount => "Insufficient payment amount",
            Self::PaymentInvalidMethod => "Invalid payment method",
            Self::PaymentExceedsBalance => "Payment exceeds the outstanding balance",
            Self::InvalidSchedule => "Invalid installment schedule",
            Self::InconsistentBalance => "Outstanding balance is inconsistent with the total",
            Self::SplitPaymentMismatch => "Split payment does not match the order total",

            // Product
            Self::ProductNotFound => "Product not found",
            Self::ProductInvalidPrice => "Invalid product price",
            Self::ProductOutOfStock => "Product out of stock",
            Self::StockCapReached => "Quantity limited to available stock",
            Self::LowStock => "Product stock is low",

            // Client
            Self::ClientNotFound => "Client not found",

            // System
            Self::InternalError => "Internal server error",
            Self::NetworkError => "Network error",
            Self::TimeoutError => "Request timed out",
            Self::ServiceUnavailable => "Service unavailable",
            Self::StaleResponse => "Response discarded for an outdated view",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown `u16` into an [`ErrorCode`]
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

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4003 => Ok(ErrorCode::OrderAlreadyCompleted),
            4004 => Ok(ErrorCode::OrderAlreadyCancelled),
            4006 => Ok(ErrorCode::OrderItemNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::InvalidTransition),
            4009 => Ok(ErrorCode::ClientRequired),
            4010 => Ok(ErrorCode::InvalidLineInput),
            4011 => Ok(ErrorCode::InvalidExchangeRate),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentInsufficientAmount),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),
            5006 => Ok(ErrorCode::PaymentExceedsBalance),
            5007 => Ok(ErrorCode::InvalidSchedule),
            5008 => Ok(ErrorCode::InconsistentBalance),
            5009 => Ok(ErrorCode::SplitPaymentMismatch),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductOutOfStock),
            6004 => Ok(ErrorCode::StockCapReached),
            6005 => Ok(ErrorCode::LowStock),

            // Client
            7001 => Ok(ErrorCode::ClientNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::TimeoutError),
            9004 => Ok(ErrorCode::ServiceUnavailable),
            9005 => Ok(ErrorCode::StaleResponse),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
