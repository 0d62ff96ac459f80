//! Petty cash (caja chica) Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoMovimiento {
    Ingreso,
    Egreso,
}

/// Petty cash movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovimientoCaja {
    #[serde(default)]
    pub id: Option<i64>,
    pub fecha: NaiveDate,
    pub tipo: TipoMovimiento,
    /// Always positive; direction is given by `tipo`
    pub monto: f64,
    #[serde(default)]
    pub concepto: String,
}
