//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts travel as `f64` in models and payloads. Every calculation converts
//! to `Decimal` first and rounds back to 2 decimal places (half-up) at the
//! boundary.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert f64 to Decimal, `None` for NaN or infinite input
#[inline]
pub fn checked_decimal(value: f64) -> Option<Decimal> {
    if value.is_finite() {
        Decimal::from_f64(value)
    } else {
        None
    }
}

/// Round to 2 decimal places, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Truncate to 2 decimal places
#[inline]
pub fn truncate_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::ToZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    let rounded = round_money(value);
    rounded.to_f64().unwrap_or_else(|| {
        tracing::error!(value = %rounded, "Decimal not representable as f64, defaulting to zero");
        0.0
    })
}

/// Round an f64 amount to 2 decimal places, half-up
#[inline]
pub fn round_f64(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Sum f64 amounts in Decimal
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().map(to_decimal).sum()
}

/// Compare two monetary values with tolerance
#[inline]
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests;
