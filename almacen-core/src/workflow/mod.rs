//! Sales workflow orchestrator
//!
//! Owns the provider handles, the catalog snapshot and the order being
//! edited, and publishes a [`VentaView`] after every change. Remote calls are
//! the only suspension points. Each one takes an epoch ticket first, and a
//! response that arrives after the epoch moved (navigation away, discard) is
//! dropped and reported as [`Submission::Stale`].

mod epoch;
mod view;

pub use epoch::NavigationGuard;
pub use view::VentaView;

use std::sync::Arc;

use futures::future::try_join;
use shared::models::{
    CanalPago, ClienteRef, CondicionPago, CuentaPorCobrar, MetodoPago, Moneda, Producto, VentaEstado,
    VentaRecibo,
};
use tokio::sync::watch;

use crate::catalog::CatalogCache;
use crate::config::SalesConfig;
use crate::error::{Advisory, Issue, VentaError, VentaResult};
use crate::lifecycle::Venta;
use crate::payment::SplitPayment;
use crate::ports::{ClientDirectory, OrderService, ProductCatalog};
use crate::receivables::Receivable;
use epoch::{Epoch, EpochTicket};

/// Outcome of an operation that awaited a remote call
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    /// Response applied to the current order
    Applied(T),
    /// Response arrived after the view was invalidated and was dropped
    Stale,
}

impl<T> Submission<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Stale => None,
        }
    }
}

pub struct VentaWorkflow {
    products: Arc<dyn ProductCatalog>,
    clients: Arc<dyn ClientDirectory>,
    orders: Arc<dyn OrderService>,
    config: SalesConfig,
    catalog: CatalogCache,
    venta: Venta,
    issues: Vec<Issue>,
    advisories: Vec<Advisory>,
    epoch: Epoch,
    view_tx: watch::Sender<VentaView>,
}

impl std::fmt::Debug for VentaWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VentaWorkflow")
            .field("venta", &self.venta.local_id())
            .field("estado", &self.venta.estado())
            .field("epoch", &self.epoch.current())
            .finish()
    }
}

impl VentaWorkflow {
    pub fn new(
        products: Arc<dyn ProductCatalog>,
        clients: Arc<dyn ClientDirectory>,
        orders: Arc<dyn OrderService>,
        config: SalesConfig,
    ) -> VentaResult<Self> {
        let venta = Venta::create(&config)?;
        let epoch = Epoch::default();
        let (view_tx, _) = watch::channel(VentaView::build(&venta, &[], &[], false, epoch.current()));
        Ok(Self {
            products,
            clients,
            orders,
            config,
            catalog: CatalogCache::default(),
            venta,
            issues: Vec::new(),
            advisories: Vec::new(),
            epoch,
            view_tx,
        })
    }

    // ========== Accessors ==========

    pub fn venta(&self) -> &Venta {
        &self.venta
    }

    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn view(&self) -> VentaView {
        self.view_tx.borrow().clone()
    }

    /// Observe the sale; a new view is published after every change
    pub fn subscribe(&self) -> watch::Receiver<VentaView> {
        self.view_tx.subscribe()
    }

    pub fn navigation_guard(&self) -> NavigationGuard {
        NavigationGuard::new(self.epoch.clone())
    }

    // ========== Internal ==========

    fn publish(&self) {
        let mut view = VentaView::build(
            &self.venta,
            &self.issues,
            &self.advisories,
            self.catalog.is_loaded(),
            self.epoch.current(),
        );
        view.sequence = self.view_tx.borrow().sequence + 1;
        self.view_tx.send_replace(view);
    }

    /// Record a failed operation as the single current issue
    fn fail(&mut self, err: VentaError) -> VentaError {
        if err.is_remote() {
            tracing::warn!(code = %err.code(), error = %err, "Remote operation failed");
        } else {
            tracing::debug!(code = %err.code(), error = %err, "Operation rejected");
        }
        self.issues = vec![Issue::from(&err)];
        self.publish();
        err
    }

    /// Apply a local edit to the order and publish the result
    fn edit<T>(&mut self, f: impl FnOnce(&mut Venta) -> VentaResult<T>) -> VentaResult<T> {
        match f(&mut self.venta) {
            Ok(value) => {
                self.issues.clear();
                self.advisories.clear();
                self.publish();
                Ok(value)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Cart mutation whose advisories replace the previous ones in the same publish
    fn edit_cart(
        &mut self,
        f: impl FnOnce(&mut Venta) -> VentaResult<Vec<Advisory>>,
    ) -> VentaResult<Vec<Advisory>> {
        let advisories = f(&mut self.venta).map_err(|e| self.fail(e))?;
        for advisory in &advisories {
            tracing::warn!(code = %advisory.code(), "{}", advisory.message());
        }
        self.issues.clear();
        self.advisories = advisories.clone();
        self.publish();
        Ok(advisories)
    }

    fn stale<T>(&self, ticket: &EpochTicket, operation: &'static str) -> Option<Submission<T>> {
        if ticket.is_current() {
            return None;
        }
        tracing::warn!(
            operation,
            local_id = %self.venta.local_id(),
            "Dropping response for invalidated sale view"
        );
        Some(Submission::Stale)
    }

    fn product(&self, producto_id: i64) -> VentaResult<Producto> {
        if !self.catalog.is_loaded() {
            return Err(VentaError::CatalogNotLoaded);
        }
        self.catalog
            .product(producto_id)
            .cloned()
            .ok_or(VentaError::ProductNotFound(producto_id))
    }

    fn client(&self, cliente_id: i64) -> VentaResult<ClienteRef> {
        if !self.catalog.is_loaded() {
            return Err(VentaError::CatalogNotLoaded);
        }
        self.catalog
            .client(cliente_id)
            .map(ClienteRef::registrado)
            .ok_or(VentaError::ClientNotFound(cliente_id))
    }

    // ========== Catalog ==========

    /// Fetch products and clients concurrently
    ///
    /// If either call fails the whole initialization fails with that single
    /// error.
    pub async fn initialize(&mut self) -> VentaResult<Submission<()>> {
        let ticket = self.epoch.ticket();
        let result = try_join(
            self.products.list_active_products(),
            self.clients.list_active_clients(),
        )
        .await;
        if let Some(stale) = self.stale(&ticket, "initialize") {
            return Ok(stale);
        }

        let (products, clients) = result.map_err(|e| self.fail(e.into()))?;
        self.catalog = CatalogCache::load(products, clients);
        self.issues.clear();
        tracing::info!(
            products = self.catalog.products().len(),
            clients = self.catalog.clients().len(),
            "Sales catalog initialized"
        );
        self.publish();
        Ok(Submission::Applied(()))
    }

    /// Remote product search
    pub async fn search_products(&mut self, term: &str) -> VentaResult<Submission<Vec<Producto>>> {
        let ticket = self.epoch.ticket();
        let result = self.products.search(term).await;
        if let Some(stale) = self.stale(&ticket, "search_products") {
            return Ok(stale);
        }
        let products = result.map_err(|e| self.fail(e.into()))?;
        Ok(Submission::Applied(products.into_iter().filter(|p| p.activo).collect()))
    }

    // ========== Order ==========

    /// Start a fresh DRAFT, dropping the current one and any in-flight
    /// response for it
    pub fn new_order(&mut self) -> VentaResult<()> {
        let venta = Venta::create(&self.config).map_err(|e| self.fail(e))?;
        self.epoch.advance();
        tracing::debug!(
            previous = %self.venta.local_id(),
            next = %venta.local_id(),
            "Starting new order"
        );
        self.venta = venta;
        self.issues.clear();
        self.advisories.clear();
        self.publish();
        Ok(())
    }

    /// Abandon the current order without saving
    pub fn discard(&mut self) -> VentaResult<()> {
        if self.venta.estado() == VentaEstado::Draft && !self.venta.cart().is_empty() {
            tracing::info!(local_id = %self.venta.local_id(), "Discarding unsaved draft");
        }
        self.new_order()
    }

    pub fn add_product(&mut self, producto_id: i64, cantidad: i32) -> VentaResult<Vec<Advisory>> {
        let producto = self.product(producto_id).map_err(|e| self.fail(e))?;
        self.edit_cart(|v| v.add_line(&producto, cantidad))
    }

    pub fn remove_line(&mut self, index: usize) -> VentaResult<()> {
        self.edit(|v| v.remove_line(index))
    }

    pub fn set_quantity(&mut self, index: usize, cantidad: i32) -> VentaResult<Vec<Advisory>> {
        self.edit_cart(|v| v.set_quantity(index, cantidad))
    }

    pub fn set_discount(&mut self, index: usize, descuento: f64) -> VentaResult<()> {
        self.edit(|v| v.set_discount(index, descuento))
    }

    pub fn set_unit_price(&mut self, index: usize, precio: f64) -> VentaResult<()> {
        self.edit(|v| v.set_unit_price(index, precio))
    }

    pub fn set_currency(&mut self, moneda: Moneda, tipo_cambio: f64) -> VentaResult<()> {
        self.edit(|v| v.set_currency(moneda, tipo_cambio))
    }

    /// Attach a registered client from the directory
    pub fn set_client(&mut self, cliente_id: i64) -> VentaResult<()> {
        let cliente = self.client(cliente_id).map_err(|e| self.fail(e))?;
        self.edit(|v| v.set_cliente(Some(cliente)))
    }

    /// Attach a free-text client name
    pub fn set_client_name(&mut self, nombre: &str) -> VentaResult<()> {
        let cliente = ClienteRef::libre(nombre.trim());
        self.edit(|v| v.set_cliente(Some(cliente)))
    }

    pub fn clear_client(&mut self) -> VentaResult<()> {
        self.edit(|v| v.set_cliente(None))
    }

    pub fn set_payment_method(&mut self, metodo: MetodoPago) -> VentaResult<()> {
        self.edit(|v| v.set_metodo_pago(metodo))
    }

    pub fn set_split(&mut self, canal: CanalPago, valor: f64) -> VentaResult<SplitPayment> {
        self.edit(|v| v.set_split(canal, valor))
    }

    pub fn set_condicion(&mut self, condicion: CondicionPago) -> VentaResult<()> {
        self.edit(|v| v.set_condicion(condicion))
    }

    pub fn set_observacion(&mut self, observacion: Option<String>) -> VentaResult<()> {
        self.edit(|v| v.set_observacion(observacion))
    }

    /// Refresh the validation error list
    pub fn validate(&mut self) -> Vec<Issue> {
        self.issues = self.venta.validation_errors().iter().map(Issue::from).collect();
        self.publish();
        self.issues.clone()
    }

    // ========== Submission ==========

    /// Persist the order as DRAFT (create or overwrite)
    pub async fn save_draft(&mut self) -> VentaResult<Submission<VentaRecibo>> {
        let payload = self.venta.draft_payload().map_err(|e| self.fail(e))?;
        let ticket = self.epoch.ticket();
        let result = self.orders.save_draft(&payload).await;
        if let Some(stale) = self.stale(&ticket, "save_draft") {
            return Ok(stale);
        }

        let recibo = result.map_err(|e| self.fail(e.into()))?;
        self.venta.mark_saved(&recibo);
        self.issues.clear();
        tracing::info!(venta_id = %recibo.id, total = payload.total, "Draft saved");
        self.publish();
        Ok(Submission::Applied(recibo))
    }

    /// Submit and complete the order
    ///
    /// An order never saved is created directly as COMPLETED. A saved draft
    /// is overwritten with the current content, then completed. The local
    /// state moves to COMPLETED only after the server confirmed.
    pub async fn complete(&mut self) -> VentaResult<Submission<VentaRecibo>> {
        let payload = self.venta.completion_payload().map_err(|e| self.fail(e))?;
        let ticket = self.epoch.ticket();

        let recibo = match self.venta.remote_id().map(str::to_string) {
            None => {
                let result = self.orders.create_order(&payload).await;
                if let Some(stale) = self.stale(&ticket, "complete") {
                    return Ok(stale);
                }
                result.map_err(|e| self.fail(e.into()))?
            }
            Some(id) => {
                let draft = self.venta.to_payload(VentaEstado::Draft);
                let saved = self.orders.save_draft(&draft).await;
                if let Some(stale) = self.stale(&ticket, "complete") {
                    return Ok(stale);
                }
                saved.map_err(|e| self.fail(e.into()))?;

                let result = self.orders.complete_order(&id).await;
                if let Some(stale) = self.stale(&ticket, "complete") {
                    return Ok(stale);
                }
                result.map_err(|e| self.fail(e.into()))?
            }
        };

        self.venta.mark_saved(&recibo);
        self.venta.complete().map_err(|e| self.fail(e))?;
        self.issues.clear();
        self.advisories.clear();
        tracing::info!(
            venta_id = %recibo.id,
            numero = ?recibo.numero,
            total = payload.total,
            "Sale completed"
        );
        self.publish();
        Ok(Submission::Applied(recibo))
    }

    /// Cancel the order; a saved draft is cancelled on the server first
    pub async fn cancel(&mut self) -> VentaResult<Submission<()>> {
        self.venta.check_cancellable().map_err(|e| self.fail(e))?;

        if let Some(id) = self.venta.remote_id().map(str::to_string) {
            let ticket = self.epoch.ticket();
            let result = self.orders.cancel_order(&id).await;
            if let Some(stale) = self.stale(&ticket, "cancel") {
                return Ok(stale);
            }
            result.map_err(|e| self.fail(e.into()))?;
        }

        self.venta.cancel().map_err(|e| self.fail(e))?;
        self.issues.clear();
        self.publish();
        Ok(Submission::Applied(()))
    }

    /// Register a payment against a credit sale
    ///
    /// The amount is checked against the outstanding balance before any
    /// remote call.
    pub async fn register_payment(
        &mut self,
        cuenta: &CuentaPorCobrar,
        monto: f64,
        metodo: MetodoPago,
        destino: Option<&str>,
    ) -> VentaResult<Submission<CuentaPorCobrar>> {
        let monto = cuenta.validate_payment(monto).map_err(|e| self.fail(e))?;
        let ticket = self.epoch.ticket();
        let result = self
            .orders
            .register_payment(&cuenta.venta_id, monto, metodo, destino)
            .await;
        if let Some(stale) = self.stale(&ticket, "register_payment") {
            return Ok(stale);
        }

        let updated = result.map_err(|e| self.fail(e.into()))?;
        self.issues.clear();
        tracing::info!(
            venta_id = %cuenta.venta_id,
            monto,
            saldo = updated.saldo_pendiente,
            "Payment registered"
        );
        self.publish();
        Ok(Submission::Applied(updated))
    }
}
