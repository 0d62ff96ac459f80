//! Receivables (cuentas por cobrar) of credit sales

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::CuentaPorCobrar;

use crate::error::{VentaError, VentaResult};
use crate::installments::{Schedule, compute_schedule};
use crate::money::{MONEY_TOLERANCE, checked_decimal, round_money, to_decimal, to_f64};

/// Receivable operations on top of the wire model
pub trait Receivable {
    /// Installment schedule for the current balance
    fn schedule(&self) -> VentaResult<Schedule>;

    /// Check a payment before it is sent: positive and not above the
    /// outstanding balance
    fn validate_payment(&self, monto: f64) -> VentaResult<f64>;

    /// Account after applying `monto` locally
    fn apply_payment(&self, monto: f64) -> VentaResult<CuentaPorCobrar>;

    fn is_settled(&self) -> bool;
}

impl Receivable for CuentaPorCobrar {
    fn schedule(&self) -> VentaResult<Schedule> {
        compute_schedule(self.total, self.numero_cuotas, self.saldo_pendiente)
    }

    fn validate_payment(&self, monto: f64) -> VentaResult<f64> {
        let monto_dec = checked_decimal(monto)
            .map(round_money)
            .filter(|m| *m > Decimal::ZERO)
            .ok_or_else(|| VentaError::InvalidPayment(format!("amount must be positive, got {}", monto)))?;
        let saldo = to_decimal(self.saldo_pendiente);
        if monto_dec - saldo >= MONEY_TOLERANCE {
            return Err(VentaError::PaymentExceedsBalance {
                monto,
                saldo: self.saldo_pendiente,
            });
        }
        Ok(to_f64(monto_dec.min(saldo)))
    }

    fn apply_payment(&self, monto: f64) -> VentaResult<CuentaPorCobrar> {
        let monto = self.validate_payment(monto)?;
        let saldo = (to_decimal(self.saldo_pendiente) - to_decimal(monto)).max(Decimal::ZERO);
        Ok(CuentaPorCobrar {
            saldo_pendiente: to_f64(saldo),
            ..self.clone()
        })
    }

    fn is_settled(&self) -> bool {
        to_decimal(self.saldo_pendiente) < MONEY_TOLERANCE
    }
}

/// Totals over a list of receivables
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivablesSummary {
    /// Sum of outstanding balances
    pub total_por_cobrar: f64,
    /// Sum of amounts already collected
    pub total_cobrado: f64,
    pub con_saldo: usize,
    pub pagadas: usize,
}

impl ReceivablesSummary {
    pub fn from_accounts(cuentas: &[CuentaPorCobrar]) -> Self {
        let mut por_cobrar = Decimal::ZERO;
        let mut cobrado = Decimal::ZERO;
        let mut con_saldo = 0;
        let mut pagadas = 0;

        for cuenta in cuentas {
            let saldo = to_decimal(cuenta.saldo_pendiente);
            por_cobrar += saldo;
            cobrado += to_decimal(cuenta.total) - saldo;
            if cuenta.is_settled() {
                pagadas += 1;
            } else {
                con_saldo += 1;
            }
        }

        Self {
            total_por_cobrar: to_f64(por_cobrar),
            total_cobrado: to_f64(cobrado),
            con_saldo,
            pagadas,
        }
    }
}
