use serde::Serialize;
use shared::models::{ClienteRef, CondicionPago, DetalleVenta, MetodoPago, Moneda, VentaEstado};
use uuid::Uuid;

use crate::error::{Advisory, Issue};
use crate::lifecycle::Venta;
use crate::payment::SplitPayment;
use crate::pricing::OrderTotals;

/// Snapshot of the sale for UI binding
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VentaView {
    pub local_id: Uuid,
    pub remote_id: Option<String>,
    pub numero: Option<String>,
    pub estado: VentaEstado,
    pub moneda: Moneda,
    pub tipo_cambio: f64,
    pub lineas: Vec<DetalleVenta>,
    pub totals: OrderTotals,
    pub metodo_pago: MetodoPago,
    pub condicion: CondicionPago,
    pub pago: SplitPayment,
    pub cliente: Option<ClienteRef>,
    /// Errors of the last operation or validation
    pub issues: Vec<Issue>,
    /// Warnings of the last cart mutation
    pub advisories: Vec<Advisory>,
    pub catalog_loaded: bool,
    pub epoch: u64,
    /// Incremented on every publish
    pub sequence: u64,
}

impl VentaView {
    pub(crate) fn build(
        venta: &Venta,
        issues: &[Issue],
        advisories: &[Advisory],
        catalog_loaded: bool,
        epoch: u64,
    ) -> Self {
        let cart = venta.cart();
        Self {
            local_id: venta.local_id(),
            remote_id: venta.remote_id().map(str::to_string),
            numero: venta.numero().map(str::to_string),
            estado: venta.estado(),
            moneda: cart.moneda(),
            tipo_cambio: cart.tipo_cambio(),
            lineas: cart.to_detalles(),
            totals: cart.totals(),
            metodo_pago: venta.metodo_pago(),
            condicion: venta.condicion(),
            pago: venta.pago(),
            cliente: venta.cliente().cloned(),
            issues: issues.to_vec(),
            advisories: advisories.to_vec(),
            catalog_loaded,
            epoch,
            sequence: 0,
        }
    }

    pub fn can_complete(&self) -> bool {
        self.estado == VentaEstado::Draft && self.issues.is_empty() && !self.lineas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SalesConfig;

    #[test]
    fn test_view_serializes_camel_case() {
        let venta = Venta::create(&SalesConfig::default()).unwrap();
        let view = VentaView::build(&venta, &[], &[], false, 0);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["estado"], "DRAFT");
        assert_eq!(json["moneda"], "PEN");
        assert_eq!(json["totals"]["total"], 0.0);
        assert_eq!(json["catalogLoaded"], false);
        assert!(!view.can_complete());
    }
}
