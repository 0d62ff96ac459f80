//! External collaborators of the sales workflow
//!
//! Implemented over HTTP by `almacen-client`, and by in-memory fakes in
//! tests. Every failure is reported as an [`AppError`].

use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{Cliente, CuentaPorCobrar, MetodoPago, Producto, VentaPayload, VentaRecibo};

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn list_active_products(&self) -> AppResult<Vec<Producto>>;

    async fn search(&self, term: &str) -> AppResult<Vec<Producto>>;
}

#[async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn list_active_clients(&self) -> AppResult<Vec<Cliente>>;
}

#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order; the payload state decides whether it is stored as
    /// draft or completed
    async fn create_order(&self, payload: &VentaPayload) -> AppResult<VentaRecibo>;

    /// Store a draft, overwriting the one with the same id if present
    async fn save_draft(&self, payload: &VentaPayload) -> AppResult<VentaRecibo>;

    async fn complete_order(&self, id: &str) -> AppResult<VentaRecibo>;

    async fn cancel_order(&self, id: &str) -> AppResult<VentaRecibo>;

    /// Register a payment against a credit sale, returning the updated
    /// receivable
    async fn register_payment(
        &self,
        order_id: &str,
        monto: f64,
        metodo: MetodoPago,
        cuenta: Option<&str>,
    ) -> AppResult<CuentaPorCobrar>;
}
