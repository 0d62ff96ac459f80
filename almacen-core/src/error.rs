//! Sales workflow errors and advisories
//!
//! [`VentaError`] aborts the operation and leaves prior state untouched.
//! [`Advisory`] is returned alongside a successful mutation (stock cap
//! reached, low stock) and never blocks it.

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::VentaEstado;
use thiserror::Error;

/// Result type for sales operations
pub type VentaResult<T> = Result<T, VentaError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VentaError {
    #[error("Invalid line input: {0}")]
    InvalidLineInput(String),

    #[error("Cart line {0} not found")]
    LineNotFound(usize),

    #[error("Product out of stock: {0}")]
    OutOfStock(String),

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Client not found: {0}")]
    ClientNotFound(i64),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(f64),

    #[error("Invalid installment schedule: {0}")]
    InvalidSchedule(String),

    #[error("Inconsistent balance: saldo {saldo} for total {total}")]
    InconsistentBalance { total: f64, saldo: f64 },

    #[error("Cannot {action} an order in {from} state")]
    InvalidTransition {
        from: VentaEstado,
        action: &'static str,
    },

    #[error("Order has no lines")]
    EmptyOrder,

    #[error("Order has no client")]
    ClientRequired,

    #[error("Invalid payment: {0}")]
    InvalidPayment(String),

    #[error("Payment {monto} exceeds outstanding balance {saldo}")]
    PaymentExceedsBalance { monto: f64, saldo: f64 },

    #[error("Payment split {pagado:.2} does not match total {total:.2}")]
    SplitMismatch { pagado: f64, total: f64 },

    #[error("Catalog not loaded")]
    CatalogNotLoaded,

    #[error("Remote operation failed: {0}")]
    Remote(#[from] AppError),
}

impl VentaError {
    /// Error code for UI localisation
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidLineInput(_) => ErrorCode::InvalidLineInput,
            Self::LineNotFound(_) => ErrorCode::OrderItemNotFound,
            Self::OutOfStock(_) => ErrorCode::ProductOutOfStock,
            Self::ProductNotFound(_) => ErrorCode::ProductNotFound,
            Self::ClientNotFound(_) => ErrorCode::ClientNotFound,
            Self::InvalidRate(_) => ErrorCode::InvalidExchangeRate,
            Self::InvalidSchedule(_) => ErrorCode::InvalidSchedule,
            Self::InconsistentBalance { .. } => ErrorCode::InconsistentBalance,
            Self::InvalidTransition { from, .. } => match from {
                VentaEstado::Completed => ErrorCode::OrderAlreadyCompleted,
                VentaEstado::Cancelled => ErrorCode::OrderAlreadyCancelled,
                VentaEstado::Draft => ErrorCode::InvalidTransition,
            },
            Self::EmptyOrder => ErrorCode::OrderEmpty,
            Self::ClientRequired => ErrorCode::ClientRequired,
            Self::InvalidPayment(_) => ErrorCode::PaymentFailed,
            Self::PaymentExceedsBalance { .. } => ErrorCode::PaymentExceedsBalance,
            Self::SplitMismatch { .. } => ErrorCode::SplitPaymentMismatch,
            Self::CatalogNotLoaded => ErrorCode::ServiceUnavailable,
            Self::Remote(e) => e.code,
        }
    }

    /// Whether the failure came from a remote collaborator
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl From<VentaError> for AppError {
    fn from(err: VentaError) -> Self {
        match err {
            VentaError::Remote(e) => e,
            other => AppError::with_message(other.code(), other.to_string()),
        }
    }
}

/// Non-blocking warning produced by a successful cart mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Advisory {
    /// Requested quantity exceeded on-hand stock and was capped
    #[serde(rename_all = "camelCase")]
    StockCapReached {
        producto_id: i64,
        nombre: String,
        requested: i32,
        max_allowed: i32,
    },
    /// Stock left after this sale is at or below the reorder threshold
    #[serde(rename_all = "camelCase")]
    LowStock {
        producto_id: i64,
        nombre: String,
        remaining: i32,
        stock_minimo: i32,
    },
}

impl Advisory {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::StockCapReached { .. } => ErrorCode::StockCapReached,
            Self::LowStock { .. } => ErrorCode::LowStock,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::StockCapReached {
                nombre,
                requested,
                max_allowed,
                ..
            } => format!(
                "{}: requested {}, only {} available",
                nombre, requested, max_allowed
            ),
            Self::LowStock {
                nombre,
                remaining,
                stock_minimo,
                ..
            } => format!(
                "{}: {} left after this sale (minimum {})",
                nombre, remaining, stock_minimo
            ),
        }
    }
}

/// Display-ready entry of the validation error list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&VentaError> for Issue {
    fn from(err: &VentaError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<&Advisory> for Issue {
    fn from(advisory: &Advisory) -> Self {
        Self {
            code: advisory.code(),
            message: advisory.message(),
        }
    }
}
