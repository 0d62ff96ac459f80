//! Almacen core - sales order composition and payment reconciliation
//!
//! Framework-independent state for one in-progress sale:
//!
//! ```text
//! VentaWorkflow
//!     ├─ CatalogCache        (products + clients, fetched concurrently)
//!     ├─ Venta               (DRAFT → COMPLETED | CANCELLED)
//!     │    ├─ Cart           (lines, eager totals, currency recalculation)
//!     │    │    ├─ pricing   (line subtotal, IGV split)
//!     │    │    ├─ currency  (PEN ⇄ USD)
//!     │    │    └─ stock     (availability, low-stock advisories)
//!     │    └─ SplitPayment   (cash / transfer)
//!     └─ ports               (remote catalog, directory, order service)
//! ```
//!
//! Installment schedules, receivables and petty cash summaries are pure
//! functions over server data.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod currency;
pub mod error;
pub mod installments;
pub mod lifecycle;
pub mod money;
pub mod payment;
pub mod petty_cash;
pub mod ports;
pub mod pricing;
pub mod receivables;
pub mod stock;
pub mod workflow;

// Re-exports
pub use cart::{Cart, CartLine};
pub use catalog::CatalogCache;
pub use config::SalesConfig;
pub use currency::convert;
pub use error::{Advisory, Issue, VentaError, VentaResult};
pub use installments::{Cuota, EstadoCuota, Schedule, SuggestedPayment, compute_schedule};
pub use lifecycle::Venta;
pub use payment::{SplitPayment, change_due, rebalance};
pub use petty_cash::{CashFlowSummary, DateRange, SaldoDiario};
pub use ports::{ClientDirectory, OrderService, ProductCatalog};
pub use pricing::{OrderTotals, compute_subtotal};
pub use receivables::{Receivable, ReceivablesSummary};
pub use stock::{Availability, check_availability};
pub use workflow::{NavigationGuard, Submission, VentaView, VentaWorkflow};
