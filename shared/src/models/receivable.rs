//! Receivable (cuenta por cobrar) Model

use super::Moneda;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outstanding credit sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuentaPorCobrar {
    pub venta_id: String,
    #[serde(default)]
    pub numero: Option<String>,
    pub cliente: String,
    #[serde(default)]
    pub moneda: Moneda,
    pub total: f64,
    pub saldo_pendiente: f64,
    pub numero_cuotas: i32,
    pub fecha: DateTime<Utc>,
}
