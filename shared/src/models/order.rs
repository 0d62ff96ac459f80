//! Order (venta) Model

use super::{CondicionPago, MetodoPago, Moneda};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VentaEstado {
    #[default]
    Draft,
    Completed,
    Cancelled,
}

impl VentaEstado {
    /// COMPLETED and CANCELLED are terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for VentaEstado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "DRAFT",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// Order line as submitted to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetalleVenta {
    pub producto_id: i64,
    pub codigo: String,
    pub nombre: String,
    pub cantidad: i32,
    pub precio_unitario: f64,
    /// Percentage 0-100
    pub descuento: f64,
    pub subtotal: f64,
}

/// Order header and lines as submitted to the backend
///
/// Used for `createOrder` and `saveDraft`. `id` is `None` until the server
/// has assigned one; re-saving a draft with an id overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VentaPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_nombre: Option<String>,
    pub moneda: Moneda,
    pub tipo_cambio: f64,
    pub metodo_pago: MetodoPago,
    pub condicion: CondicionPago,
    pub pago_efectivo: f64,
    pub pago_transferencia: f64,
    pub detalles: Vec<DetalleVenta>,
    pub subtotal: f64,
    pub igv: f64,
    pub total: f64,
    pub estado: VentaEstado,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacion: Option<String>,
    pub fecha: DateTime<Utc>,
}

/// Server acknowledgement of a submitted or transitioned order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VentaRecibo {
    pub id: String,
    /// Document number (boleta/factura), assigned on completion
    #[serde(default)]
    pub numero: Option<String>,
    pub estado: VentaEstado,
}
