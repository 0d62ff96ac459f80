//! Split-payment allocation between cash and transfer

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{CanalPago, MetodoPago};

use crate::error::{VentaError, VentaResult};
use crate::money::{checked_decimal, money_eq, round_money, to_decimal, to_f64};

/// Amounts settled per channel
///
/// For single-channel methods one side holds the full total and the other
/// is zero. For [`MetodoPago::Mixto`] both sides always add up to the total.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPayment {
    pub efectivo: f64,
    pub transferencia: f64,
}

impl SplitPayment {
    /// Default allocation of `total` for a payment method
    ///
    /// A new mixed payment starts fully in cash.
    pub fn for_method(metodo: MetodoPago, total: f64) -> Self {
        match metodo.canal().unwrap_or(CanalPago::Efectivo) {
            CanalPago::Efectivo => Self {
                efectivo: total,
                transferencia: 0.0,
            },
            CanalPago::Transferencia => Self {
                efectivo: 0.0,
                transferencia: total,
            },
        }
    }

    pub fn amount(&self, canal: CanalPago) -> f64 {
        match canal {
            CanalPago::Efectivo => self.efectivo,
            CanalPago::Transferencia => self.transferencia,
        }
    }

    pub fn sum(&self) -> f64 {
        to_f64(to_decimal(self.efectivo) + to_decimal(self.transferencia))
    }

    pub fn is_balanced(&self, total: f64) -> bool {
        money_eq(self.sum(), total)
    }

    /// Re-fit the allocation after the order total changed
    ///
    /// Mixed payments keep the cash portion (clamped to the new total);
    /// single-channel methods move the full total to their channel.
    pub fn retotal(&self, metodo: MetodoPago, total: f64) -> Self {
        if metodo.is_mixed() {
            rebalance(total, CanalPago::Efectivo, self.efectivo)
        } else {
            Self::for_method(metodo, total)
        }
    }
}

/// Split `total` after the caller edited one channel
///
/// The edited value is clamped to `[0, total]` and the other channel gets
/// the remainder. Non-finite input counts as zero.
pub fn rebalance(total: f64, canal: CanalPago, valor: f64) -> SplitPayment {
    let total = round_money(to_decimal(total)).max(Decimal::ZERO);
    let valor = checked_decimal(valor)
        .map(round_money)
        .unwrap_or(Decimal::ZERO)
        .clamp(Decimal::ZERO, total);
    let resto = total - valor;

    let (efectivo, transferencia) = match canal {
        CanalPago::Efectivo => (valor, resto),
        CanalPago::Transferencia => (resto, valor),
    };
    SplitPayment {
        efectivo: to_f64(efectivo),
        transferencia: to_f64(transferencia),
    }
}

/// Change owed when `recibido` is tendered for the cash portion
pub fn change_due(recibido: f64, efectivo: f64) -> VentaResult<f64> {
    let recibido_dec = checked_decimal(recibido)
        .ok_or_else(|| VentaError::InvalidPayment(format!("tendered amount must be finite, got {}", recibido)))?;
    let efectivo_dec = to_decimal(efectivo);
    if recibido_dec < efectivo_dec {
        return Err(VentaError::InvalidPayment(format!(
            "tendered {} is less than cash due {}",
            recibido, efectivo
        )));
    }
    Ok(to_f64(recibido_dec - efectivo_dec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_cash_edit() {
        let split = rebalance(150.0, CanalPago::Efectivo, 50.0);
        assert_eq!(split.efectivo, 50.0);
        assert_eq!(split.transferencia, 100.0);
    }

    #[test]
    fn test_mixed_transfer_edit() {
        let split = rebalance(150.0, CanalPago::Transferencia, 20.25);
        assert_eq!(split.efectivo, 129.75);
        assert_eq!(split.transferencia, 20.25);
    }

    #[test]
    fn test_rebalance_clamps() {
        let split = rebalance(150.0, CanalPago::Efectivo, 500.0);
        assert_eq!((split.efectivo, split.transferencia), (150.0, 0.0));

        let split = rebalance(150.0, CanalPago::Efectivo, -10.0);
        assert_eq!((split.efectivo, split.transferencia), (0.0, 150.0));

        let split = rebalance(150.0, CanalPago::Transferencia, f64::NAN);
        assert_eq!((split.efectivo, split.transferencia), (150.0, 0.0));
    }

    #[test]
    fn test_rebalance_always_sums_to_total() {
        for total in [0.0, 0.01, 99.99, 150.0, 1234.56] {
            for valor in [-1.0, 0.0, 0.005, 33.333, 75.0, 99.995, 2000.0] {
                for canal in [CanalPago::Efectivo, CanalPago::Transferencia] {
                    let split = rebalance(total, canal, valor);
                    assert!(split.is_balanced(total), "{:?} for {}", split, total);
                }
            }
        }
    }

    #[test]
    fn test_for_method() {
        assert_eq!(
            SplitPayment::for_method(MetodoPago::Tarjeta, 80.0),
            SplitPayment {
                efectivo: 0.0,
                transferencia: 80.0
            }
        );
        let mixed = SplitPayment::for_method(MetodoPago::Mixto, 80.0);
        assert_eq!(mixed.amount(CanalPago::Efectivo), 80.0);
        assert_eq!(mixed.amount(CanalPago::Transferencia), 0.0);
    }

    #[test]
    fn test_retotal() {
        let split = rebalance(150.0, CanalPago::Efectivo, 50.0);
        let shrunk = split.retotal(MetodoPago::Mixto, 40.0);
        assert_eq!((shrunk.efectivo, shrunk.transferencia), (40.0, 0.0));

        let grown = split.retotal(MetodoPago::Mixto, 200.0);
        assert_eq!((grown.efectivo, grown.transferencia), (50.0, 150.0));

        let cash = split.retotal(MetodoPago::Efectivo, 200.0);
        assert_eq!((cash.efectivo, cash.transferencia), (200.0, 0.0));
    }

    #[test]
    fn test_change_due() {
        assert_eq!(change_due(100.0, 72.5).unwrap(), 27.5);
        assert_eq!(change_due(72.5, 72.5).unwrap(), 0.0);
        assert!(matches!(change_due(50.0, 72.5), Err(VentaError::InvalidPayment(_))));
        assert!(change_due(f64::NAN, 10.0).is_err());
    }
}
