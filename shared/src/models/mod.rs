//! Data models
//!
//! Wire types exchanged with the sales backend. Field names are camelCase on
//! the wire; enumerated fields are tagged enums rather than free strings.

pub mod cash;
pub mod client;
pub mod currency;
pub mod order;
pub mod payment;
pub mod product;
pub mod receivable;

// Re-exports
pub use cash::*;
pub use client::*;
pub use currency::*;
pub use order::*;
pub use payment::*;
pub use product::*;
pub use receivable::*;
