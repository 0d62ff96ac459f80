//! Almacen client - REST backend for the sales workflow
//!
//! Implements the `almacen-core` provider traits over the warehouse HTTP API.

pub mod api;
pub mod config;
pub mod credential;
pub mod error;
pub mod http;
pub mod logger;

pub use api::RestBackend;
pub use config::ClientConfig;
pub use credential::SessionCredential;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::response::ApiResponse;
