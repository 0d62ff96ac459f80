//! Order (venta) lifecycle
//!
//! ```text
//! DRAFT ──complete──▶ COMPLETED
//!   │
//!   └───cancel────▶ CANCELLED
//! ```
//!
//! Only a DRAFT order can be edited, saved, completed or cancelled. Both end
//! states are terminal; reversing a completed sale is a server-side credit
//! note.

use chrono::{DateTime, Utc};
use shared::models::{
    CanalPago, ClienteRef, CondicionPago, MetodoPago, Moneda, Producto, VentaEstado, VentaPayload,
    VentaRecibo,
};
use uuid::Uuid;

use crate::cart::Cart;
use crate::config::SalesConfig;
use crate::error::{Advisory, VentaError, VentaResult};
use crate::payment::{SplitPayment, rebalance};

#[derive(Debug, Clone, PartialEq)]
pub struct Venta {
    local_id: Uuid,
    remote_id: Option<String>,
    numero: Option<String>,
    estado: VentaEstado,
    cart: Cart,
    cliente: Option<ClienteRef>,
    metodo_pago: MetodoPago,
    condicion: CondicionPago,
    pago: SplitPayment,
    observacion: Option<String>,
    creada: DateTime<Utc>,
}

impl Venta {
    /// New DRAFT order with an empty cart
    pub fn create(config: &SalesConfig) -> VentaResult<Self> {
        let cart = Cart::new(config.moneda, config.tipo_cambio)?;
        let venta = Self {
            local_id: Uuid::new_v4(),
            remote_id: None,
            numero: None,
            estado: VentaEstado::Draft,
            cart,
            cliente: None,
            metodo_pago: MetodoPago::default(),
            condicion: CondicionPago::default(),
            pago: SplitPayment::default(),
            observacion: None,
            creada: Utc::now(),
        };
        tracing::debug!(local_id = %venta.local_id, moneda = %config.moneda, "Order created");
        Ok(venta)
    }

    pub fn local_id(&self) -> Uuid {
        self.local_id
    }

    /// Server id, once saved
    pub fn remote_id(&self) -> Option<&str> {
        self.remote_id.as_deref()
    }

    /// Document number assigned by the server
    pub fn numero(&self) -> Option<&str> {
        self.numero.as_deref()
    }

    pub fn estado(&self) -> VentaEstado {
        self.estado
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cliente(&self) -> Option<&ClienteRef> {
        self.cliente.as_ref()
    }

    pub fn metodo_pago(&self) -> MetodoPago {
        self.metodo_pago
    }

    pub fn condicion(&self) -> CondicionPago {
        self.condicion
    }

    pub fn pago(&self) -> SplitPayment {
        self.pago
    }

    pub fn observacion(&self) -> Option<&str> {
        self.observacion.as_deref()
    }

    fn ensure_draft(&self, action: &'static str) -> VentaResult<()> {
        if self.estado != VentaEstado::Draft {
            return Err(VentaError::InvalidTransition {
                from: self.estado,
                action,
            });
        }
        Ok(())
    }

    /// Keep the payment split in line with the cart total
    fn sync_pago(&mut self) {
        self.pago = self.pago.retotal(self.metodo_pago, self.cart.totals().total);
    }

    // ========== Cart edits ==========

    pub fn add_line(&mut self, producto: &Producto, cantidad: i32) -> VentaResult<Vec<Advisory>> {
        self.ensure_draft("edit")?;
        let advisories = self.cart.add_line(producto, cantidad)?;
        self.sync_pago();
        Ok(advisories)
    }

    pub fn remove_line(&mut self, index: usize) -> VentaResult<()> {
        self.ensure_draft("edit")?;
        self.cart.remove_line(index)?;
        self.sync_pago();
        Ok(())
    }

    pub fn set_quantity(&mut self, index: usize, cantidad: i32) -> VentaResult<Vec<Advisory>> {
        self.ensure_draft("edit")?;
        let advisories = self.cart.set_quantity(index, cantidad)?;
        self.sync_pago();
        Ok(advisories)
    }

    pub fn set_discount(&mut self, index: usize, descuento: f64) -> VentaResult<()> {
        self.ensure_draft("edit")?;
        self.cart.set_discount(index, descuento)?;
        self.sync_pago();
        Ok(())
    }

    pub fn set_unit_price(&mut self, index: usize, precio: f64) -> VentaResult<()> {
        self.ensure_draft("edit")?;
        self.cart.set_unit_price(index, precio)?;
        self.sync_pago();
        Ok(())
    }

    /// Change the order currency or exchange rate, re-pricing every line
    pub fn set_currency(&mut self, moneda: Moneda, tipo_cambio: f64) -> VentaResult<()> {
        self.ensure_draft("edit")?;
        self.cart.recalculate_all(moneda, tipo_cambio)?;
        self.sync_pago();
        Ok(())
    }

    pub fn clear_cart(&mut self) -> VentaResult<()> {
        self.ensure_draft("edit")?;
        self.cart.clear();
        self.sync_pago();
        Ok(())
    }

    // ========== Header edits ==========

    pub fn set_cliente(&mut self, cliente: Option<ClienteRef>) -> VentaResult<()> {
        self.ensure_draft("edit")?;
        self.cliente = cliente;
        Ok(())
    }

    pub fn set_metodo_pago(&mut self, metodo: MetodoPago) -> VentaResult<()> {
        self.ensure_draft("edit")?;
        self.metodo_pago = metodo;
        self.pago = SplitPayment::for_method(metodo, self.cart.totals().total);
        Ok(())
    }

    /// Edit one channel of a mixed payment; the other gets the remainder
    pub fn set_split(&mut self, canal: CanalPago, valor: f64) -> VentaResult<SplitPayment> {
        self.ensure_draft("edit")?;
        if !self.metodo_pago.is_mixed() {
            return Err(VentaError::InvalidPayment(format!(
                "split amounts only apply to mixed payments, method is {:?}",
                self.metodo_pago
            )));
        }
        self.pago = rebalance(self.cart.totals().total, canal, valor);
        Ok(self.pago)
    }

    pub fn set_condicion(&mut self, condicion: CondicionPago) -> VentaResult<()> {
        self.ensure_draft("edit")?;
        match condicion {
            CondicionPago::Credito { numero_cuotas } if numero_cuotas <= 0 => {
                return Err(VentaError::InvalidSchedule(format!(
                    "installment count must be positive, got {}",
                    numero_cuotas
                )));
            }
            _ => {}
        }
        self.condicion = condicion;
        Ok(())
    }

    pub fn set_observacion(&mut self, observacion: Option<String>) -> VentaResult<()> {
        self.ensure_draft("edit")?;
        self.observacion = observacion.filter(|o| !o.trim().is_empty());
        Ok(())
    }

    // ========== Validation ==========

    /// Everything that currently prevents completion
    pub fn validation_errors(&self) -> Vec<VentaError> {
        let mut errors = Vec::new();
        if self.cart.is_empty() {
            errors.push(VentaError::EmptyOrder);
        }
        if !self.cliente.as_ref().is_some_and(ClienteRef::is_resolved) {
            errors.push(VentaError::ClientRequired);
        }
        let total = self.cart.totals().total;
        if !self.pago.is_balanced(total) {
            errors.push(VentaError::SplitMismatch {
                pagado: self.pago.sum(),
                total,
            });
        }
        errors
    }

    /// DRAFT with a non-empty cart, a resolved client and a balanced payment
    pub fn check_completable(&self) -> VentaResult<()> {
        self.ensure_draft("complete")?;
        match self.validation_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn check_cancellable(&self) -> VentaResult<()> {
        self.ensure_draft("cancel")
    }

    // ========== Transitions ==========

    /// Payload for saving the order as DRAFT
    pub fn draft_payload(&self) -> VentaResult<VentaPayload> {
        self.ensure_draft("save")?;
        Ok(self.to_payload(VentaEstado::Draft))
    }

    /// Payload for submitting the order as COMPLETED
    pub fn completion_payload(&self) -> VentaResult<VentaPayload> {
        self.check_completable()?;
        Ok(self.to_payload(VentaEstado::Completed))
    }

    /// Record the server acknowledgement of a save
    pub fn mark_saved(&mut self, recibo: &VentaRecibo) {
        self.remote_id = Some(recibo.id.clone());
        if recibo.numero.is_some() {
            self.numero = recibo.numero.clone();
        }
    }

    pub fn complete(&mut self) -> VentaResult<()> {
        self.check_completable()?;
        self.estado = VentaEstado::Completed;
        tracing::info!(
            local_id = %self.local_id,
            remote_id = ?self.remote_id,
            total = self.cart.totals().total,
            "Order completed"
        );
        Ok(())
    }

    pub fn cancel(&mut self) -> VentaResult<()> {
        self.check_cancellable()?;
        self.estado = VentaEstado::Cancelled;
        tracing::info!(local_id = %self.local_id, remote_id = ?self.remote_id, "Order cancelled");
        Ok(())
    }

    pub fn to_payload(&self, estado: VentaEstado) -> VentaPayload {
        let totals = self.cart.totals();
        VentaPayload {
            id: self.remote_id.clone(),
            cliente_id: self.cliente.as_ref().and_then(ClienteRef::id),
            cliente_nombre: self.cliente.as_ref().map(|c| c.nombre().to_string()),
            moneda: self.cart.moneda(),
            tipo_cambio: self.cart.tipo_cambio(),
            metodo_pago: self.metodo_pago,
            condicion: self.condicion,
            pago_efectivo: self.pago.efectivo,
            pago_transferencia: self.pago.transferencia,
            detalles: self.cart.to_detalles(),
            subtotal: totals.subtotal,
            igv: totals.igv,
            total: totals.total,
            estado,
            observacion: self.observacion.clone(),
            fecha: self.creada,
        }
    }
}
