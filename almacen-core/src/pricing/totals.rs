use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::{round_money, to_f64};

/// IGV rate (18%), included in displayed prices
pub const IGV_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Tax-inclusive order totals
///
/// `total` is the sum of line subtotals. `subtotal` is the amount before
/// IGV and `igv = total - subtotal`, so the parts always add up exactly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: f64,
    pub igv: f64,
    pub total: f64,
}

impl OrderTotals {
    pub fn from_total(total: Decimal) -> Self {
        let total = round_money(total);
        let subtotal = round_money(total / (Decimal::ONE + IGV_RATE));
        let igv = total - subtotal;
        Self {
            subtotal: to_f64(subtotal),
            igv: to_f64(igv),
            total: to_f64(total),
        }
    }

    /// Totals from line subtotals
    pub fn from_lines<I>(subtotales: I) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        Self::from_total(subtotales.into_iter().sum())
    }

    pub fn is_zero(&self) -> bool {
        self.total == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{money_eq, to_decimal};

    #[test]
    fn test_tax_inclusive_split() {
        let totals = OrderTotals::from_total(Decimal::from(30));
        assert_eq!(totals.total, 30.0);
        assert_eq!(totals.subtotal, 25.42);
        assert_eq!(totals.igv, 4.58);
    }

    #[test]
    fn test_parts_add_up() {
        for cents in [1_i64, 99, 1_000, 12_345, 99_999, 1_000_001] {
            let totals = OrderTotals::from_total(Decimal::new(cents, 2));
            assert!(money_eq(totals.subtotal + totals.igv, totals.total));
            let expected_igv = to_decimal(totals.total) - to_decimal(totals.total) / Decimal::new(118, 2);
            assert!(money_eq(totals.igv, crate::money::to_f64(expected_igv)));
        }
    }

    #[test]
    fn test_from_lines() {
        let totals = OrderTotals::from_lines([Decimal::new(1050, 2), Decimal::new(2000, 2)]);
        assert_eq!(totals.total, 30.5);
        assert!(OrderTotals::default().is_zero());
    }
}
