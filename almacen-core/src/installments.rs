//! Installment reconciler for credit sales
//!
//! The schedule is derived on demand from the sale total, the installment
//! count and the outstanding balance. Payments are allocated greedily and
//! strictly in order: an installment only receives money once every earlier
//! installment is fully paid.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{VentaError, VentaResult};
use crate::money::{checked_decimal, round_money, to_f64, truncate_money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoCuota {
    Pagado,
    Parcial,
    Pendiente,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cuota {
    /// 1-based position
    pub numero: i32,
    pub monto: f64,
    pub pagado: f64,
    pub pendiente: f64,
    pub estado: EstadoCuota,
}

/// Pre-filled amount for the payment form
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedPayment {
    pub numero: i32,
    pub monto: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub total: f64,
    pub numero_cuotas: i32,
    pub saldo_pendiente: f64,
    /// Regular installment amount; the last one absorbs the rounding remainder
    pub valor_cuota: f64,
    pub cuotas: Vec<Cuota>,
}

impl Schedule {
    /// First installment not fully paid, with its pending amount
    ///
    /// Zero-amount installments are never suggested.
    pub fn suggest_next_payment(&self) -> Option<SuggestedPayment> {
        self.cuotas
            .iter()
            .find(|c| c.estado != EstadoCuota::Pagado && c.pendiente > 0.0)
            .map(|c| SuggestedPayment {
                numero: c.numero,
                monto: c.pendiente,
            })
    }

    /// Amount paid so far (`total - saldo_pendiente`)
    pub fn monto_pagado(&self) -> f64 {
        self.cuotas.iter().map(|c| c.pagado).sum::<f64>()
    }

    pub fn is_settled(&self) -> bool {
        self.cuotas.iter().all(|c| c.estado == EstadoCuota::Pagado)
    }

    pub fn count(&self, estado: EstadoCuota) -> usize {
        self.cuotas.iter().filter(|c| c.estado == estado).count()
    }
}

/// Derive the installment schedule of a credit sale
pub fn compute_schedule(total: f64, numero_cuotas: i32, saldo_pendiente: f64) -> VentaResult<Schedule> {
    if numero_cuotas <= 0 {
        return Err(VentaError::InvalidSchedule(format!(
            "installment count must be positive, got {}",
            numero_cuotas
        )));
    }
    let total_dec = match checked_decimal(total) {
        Some(t) if t >= Decimal::ZERO => round_money(t),
        _ => {
            return Err(VentaError::InvalidSchedule(format!(
                "total must be a non-negative amount, got {}",
                total
            )));
        }
    };
    let saldo_dec = match checked_decimal(saldo_pendiente).map(round_money) {
        Some(s) if s >= Decimal::ZERO && s <= total_dec => s,
        _ => {
            return Err(VentaError::InconsistentBalance {
                total,
                saldo: saldo_pendiente,
            });
        }
    };

    let n = Decimal::from(numero_cuotas);
    let valor_cuota = truncate_money(total_dec / n);
    let ultima = total_dec - valor_cuota * (n - Decimal::ONE);

    let mut disponible = total_dec - saldo_dec;
    let cuotas = (1..=numero_cuotas)
        .map(|numero| {
            let monto = if numero == numero_cuotas { ultima } else { valor_cuota };
            let (pagado, estado) = if monto.is_zero() {
                // 0.00 installments follow the money: paid once something reached them
                if disponible > Decimal::ZERO || saldo_dec.is_zero() {
                    (Decimal::ZERO, EstadoCuota::Pagado)
                } else {
                    (Decimal::ZERO, EstadoCuota::Pendiente)
                }
            } else if disponible >= monto {
                (monto, EstadoCuota::Pagado)
            } else if disponible > Decimal::ZERO {
                (disponible, EstadoCuota::Parcial)
            } else {
                (Decimal::ZERO, EstadoCuota::Pendiente)
            };
            disponible -= pagado;
            Cuota {
                numero,
                monto: to_f64(monto),
                pagado: to_f64(pagado),
                pendiente: to_f64(monto - pagado),
                estado,
            }
        })
        .collect();

    Ok(Schedule {
        total: to_f64(total_dec),
        numero_cuotas,
        saldo_pendiente: to_f64(saldo_dec),
        valor_cuota: to_f64(valor_cuota),
        cuotas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::money_eq;

    fn estados(schedule: &Schedule) -> Vec<EstadoCuota> {
        schedule.cuotas.iter().map(|c| c.estado).collect()
    }

    #[test]
    fn test_two_paid_one_pending() {
        let schedule = compute_schedule(300.0, 3, 100.0).unwrap();
        assert_eq!(
            estados(&schedule),
            vec![EstadoCuota::Pagado, EstadoCuota::Pagado, EstadoCuota::Pendiente]
        );
        let pairs: Vec<(f64, f64)> = schedule.cuotas.iter().map(|c| (c.pagado, c.pendiente)).collect();
        assert_eq!(pairs, vec![(100.0, 0.0), (100.0, 0.0), (0.0, 100.0)]);
        assert_eq!(
            schedule.suggest_next_payment(),
            Some(SuggestedPayment {
                numero: 3,
                monto: 100.0
            })
        );
    }

    #[test]
    fn test_partial_installment() {
        let schedule = compute_schedule(300.0, 3, 150.0).unwrap();
        assert_eq!(
            estados(&schedule),
            vec![EstadoCuota::Pagado, EstadoCuota::Parcial, EstadoCuota::Pendiente]
        );
        assert_eq!(schedule.cuotas[1].pagado, 50.0);
        assert_eq!(schedule.cuotas[1].pendiente, 50.0);
        assert_eq!(schedule.suggest_next_payment().map(|s| s.monto), Some(50.0));
    }

    #[test]
    fn test_nothing_paid_and_fully_paid() {
        let pending = compute_schedule(120.0, 4, 120.0).unwrap();
        assert_eq!(pending.count(EstadoCuota::Pendiente), 4);
        assert_eq!(pending.suggest_next_payment().map(|s| s.numero), Some(1));

        let settled = compute_schedule(120.0, 4, 0.0).unwrap();
        assert!(settled.is_settled());
        assert!(settled.suggest_next_payment().is_none());
    }

    #[test]
    fn test_remainder_on_last_installment() {
        let schedule = compute_schedule(100.0, 3, 100.0).unwrap();
        let montos: Vec<f64> = schedule.cuotas.iter().map(|c| c.monto).collect();
        assert_eq!(montos, vec![33.33, 33.33, 33.34]);
        assert_eq!(schedule.valor_cuota, 33.33);
    }

    #[test]
    fn test_zero_amount_installments_follow_payments() {
        let unpaid = compute_schedule(0.05, 7, 0.05).unwrap();
        assert_eq!(unpaid.valor_cuota, 0.0);
        assert_eq!(unpaid.count(EstadoCuota::Pagado), 0);
        assert_eq!(unpaid.count(EstadoCuota::Pendiente), 7);
        assert_eq!(
            unpaid.suggest_next_payment(),
            Some(SuggestedPayment {
                numero: 7,
                monto: 0.05
            })
        );

        let partial = compute_schedule(0.05, 7, 0.02).unwrap();
        assert_eq!(partial.count(EstadoCuota::Pagado), 6);
        assert_eq!(partial.cuotas[6].estado, EstadoCuota::Parcial);
        assert_eq!(partial.cuotas[6].pagado, 0.03);

        let settled = compute_schedule(0.05, 7, 0.0).unwrap();
        assert!(settled.is_settled());

        let empty = compute_schedule(0.0, 3, 0.0).unwrap();
        assert!(empty.is_settled());
        assert!(empty.suggest_next_payment().is_none());
    }

    #[test]
    fn test_paid_sum_matches_balance() {
        for (total, n) in [(100.0, 3), (999.99, 7), (1500.0, 12), (0.05, 2)] {
            for fraction in [0.0, 0.1, 0.333, 0.5, 0.9, 1.0] {
                let saldo = crate::money::round_f64(total * fraction);
                let schedule = compute_schedule(total, n, saldo).unwrap();
                assert!(money_eq(schedule.monto_pagado(), total - saldo));
                for cuota in &schedule.cuotas {
                    match cuota.estado {
                        EstadoCuota::Pagado => assert!(money_eq(cuota.pagado, cuota.monto)),
                        EstadoCuota::Parcial => assert!(cuota.pagado > 0.0 && cuota.pagado < cuota.monto),
                        EstadoCuota::Pendiente => assert_eq!(cuota.pagado, 0.0),
                    }
                }
            }
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            compute_schedule(300.0, 0, 100.0),
            Err(VentaError::InvalidSchedule(_))
        ));
        assert!(matches!(
            compute_schedule(300.0, -2, 100.0),
            Err(VentaError::InvalidSchedule(_))
        ));
        assert!(matches!(
            compute_schedule(300.0, 3, 300.01),
            Err(VentaError::InconsistentBalance { .. })
        ));
        assert!(matches!(
            compute_schedule(300.0, 3, -1.0),
            Err(VentaError::InconsistentBalance { .. })
        ));
        assert!(compute_schedule(f64::NAN, 3, 0.0).is_err());
    }
}
