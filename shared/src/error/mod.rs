//! Unified error system
//!
//! - [`ErrorCode`]: standardized numeric codes shared with the backend and UI
//! - [`ErrorCategory`]: classification of codes by domain
//! - [`AppError`]: code + message + optional structured details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order (venta) errors
//! - 5xxx: Payment errors
//! - 6xxx: Product / stock errors
//! - 7xxx: Client errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::OrderNotFound);
//! assert_eq!(err.code.code(), 4001);
//!
//! let err = AppError::validation("cantidad must be positive").with_detail("field", "cantidad");
//! assert!(err.details.is_some());
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
