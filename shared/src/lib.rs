//! Shared types for the Almacen workspace
//!
//! Wire models exchanged with the sales backend, the unified error code
//! table and the API response envelope. Used by both `almacen-core` and
//! `almacen-client`.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
