//! Petty cash (caja chica) aggregation

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{MovimientoCaja, TipoMovimiento};

use crate::money::{checked_decimal, to_f64};

/// Inclusive date range; open ends are unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(desde: Option<NaiveDate>, hasta: Option<NaiveDate>) -> Self {
        Self { desde, hasta }
    }

    pub fn contains(&self, fecha: NaiveDate) -> bool {
        self.desde.is_none_or(|d| fecha >= d) && self.hasta.is_none_or(|h| fecha <= h)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaldoDiario {
    pub fecha: NaiveDate,
    pub ingresos: f64,
    pub egresos: f64,
    /// Running balance at the end of the day
    pub saldo: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSummary {
    pub total_ingresos: f64,
    pub total_egresos: f64,
    pub saldo: f64,
    pub movimientos: usize,
    pub diario: Vec<SaldoDiario>,
}

impl CashFlowSummary {
    /// Aggregate the movements falling inside `range`
    ///
    /// Movements with a non-finite or negative amount are skipped.
    pub fn from_movements(movimientos: &[MovimientoCaja], range: DateRange) -> Self {
        Self::with_opening_balance(movimientos, range, 0.0)
    }

    /// Same as [`CashFlowSummary::from_movements`], starting the running
    /// balance at `saldo_inicial`
    pub fn with_opening_balance(movimientos: &[MovimientoCaja], range: DateRange, saldo_inicial: f64) -> Self {
        let mut por_dia: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
        let mut count = 0;

        for mov in movimientos.iter().filter(|m| range.contains(m.fecha)) {
            let monto = match checked_decimal(mov.monto) {
                Some(m) if m >= Decimal::ZERO => m,
                _ => {
                    tracing::warn!(id = ?mov.id, monto = mov.monto, "Skipping petty cash movement with invalid amount");
                    continue;
                }
            };
            let entry = por_dia.entry(mov.fecha).or_default();
            match mov.tipo {
                TipoMovimiento::Ingreso => entry.0 += monto,
                TipoMovimiento::Egreso => entry.1 += monto,
            }
            count += 1;
        }

        let mut saldo = checked_decimal(saldo_inicial).unwrap_or(Decimal::ZERO);
        let mut total_ingresos = Decimal::ZERO;
        let mut total_egresos = Decimal::ZERO;
        let diario = por_dia
            .into_iter()
            .map(|(fecha, (ingresos, egresos))| {
                total_ingresos += ingresos;
                total_egresos += egresos;
                saldo += ingresos - egresos;
                SaldoDiario {
                    fecha,
                    ingresos: to_f64(ingresos),
                    egresos: to_f64(egresos),
                    saldo: to_f64(saldo),
                }
            })
            .collect();

        Self {
            total_ingresos: to_f64(total_ingresos),
            total_egresos: to_f64(total_egresos),
            saldo: to_f64(saldo),
            movimientos: count,
            diario,
        }
    }
}
