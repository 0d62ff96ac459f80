//! Payment Model

use serde::{Deserialize, Serialize};

/// How an order is paid at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetodoPago {
    #[default]
    Efectivo,
    Transferencia,
    Tarjeta,
    /// Part cash, part transfer
    Mixto,
}

impl MetodoPago {
    /// Channel that carries the full amount for single-channel methods
    ///
    /// Returns `None` for [`MetodoPago::Mixto`].
    pub fn canal(&self) -> Option<CanalPago> {
        match self {
            Self::Efectivo => Some(CanalPago::Efectivo),
            Self::Transferencia | Self::Tarjeta => Some(CanalPago::Transferencia),
            Self::Mixto => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixto)
    }
}

/// One of the two settlement channels of a split payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanalPago {
    Efectivo,
    Transferencia,
}

impl CanalPago {
    /// The other channel
    pub fn other(&self) -> Self {
        match self {
            Self::Efectivo => Self::Transferencia,
            Self::Transferencia => Self::Efectivo,
        }
    }
}

/// Sale terms: paid in full now, or on credit in equal installments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CondicionPago {
    #[default]
    Contado,
    #[serde(rename_all = "camelCase")]
    Credito { numero_cuotas: i32 },
}

/// Payment registered against an order (receivables)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroPago {
    pub monto: f64,
    pub metodo: MetodoPago,
    /// Destination account for transfers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuenta: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metodo_canal() {
        assert_eq!(MetodoPago::Efectivo.canal(), Some(CanalPago::Efectivo));
        assert_eq!(MetodoPago::Tarjeta.canal(), Some(CanalPago::Transferencia));
        assert_eq!(MetodoPago::Mixto.canal(), None);
        assert!(MetodoPago::Mixto.is_mixed());
    }

    #[test]
    fn test_canal_other() {
        assert_eq!(CanalPago::Efectivo.other(), CanalPago::Transferencia);
        assert_eq!(CanalPago::Transferencia.other(), CanalPago::Efectivo);
    }

    #[test]
    fn test_condicion_serde() {
        let json = serde_json::to_string(&CondicionPago::Credito { numero_cuotas: 3 }).unwrap();
        assert_eq!(json, r#"{"tipo":"CREDITO","numeroCuotas":3}"#);
        let c: CondicionPago = serde_json::from_str(r#"{"tipo":"CONTADO"}"#).unwrap();
        assert_eq!(c, CondicionPago::Contado);
    }
}
