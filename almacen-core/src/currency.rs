//! Currency conversion between the local currency (PEN) and USD
//!
//! `tipo_cambio` is always expressed as local units per USD.

use rust_decimal::Decimal;
use shared::models::Moneda;

use crate::error::{VentaError, VentaResult};
use crate::money::{checked_decimal, round_money, to_f64};

/// Validate an exchange rate: finite and strictly positive
pub fn validate_rate(tipo_cambio: f64) -> VentaResult<Decimal> {
    match checked_decimal(tipo_cambio) {
        Some(rate) if rate > Decimal::ZERO => Ok(rate),
        _ => Err(VentaError::InvalidRate(tipo_cambio)),
    }
}

/// Convert `amount` from one currency to another
///
/// The rate is validated even when both currencies match, so a bad rate is
/// reported as soon as it is entered. Amounts that cannot be represented
/// before or after conversion are rejected.
pub fn convert(amount: f64, from: Moneda, to: Moneda, tipo_cambio: f64) -> VentaResult<f64> {
    let rate = validate_rate(tipo_cambio)?;
    let value = checked_decimal(amount)
        .ok_or_else(|| VentaError::InvalidLineInput(format!("amount out of range, got {}", amount)))?;
    if from == to {
        return Ok(amount);
    }
    let converted = match (from, to) {
        (Moneda::Usd, Moneda::Pen) => value.checked_mul(rate),
        (Moneda::Pen, Moneda::Usd) => value.checked_div(rate),
        _ => Some(value),
    };
    converted
        .map(|c| to_f64(round_money(c)))
        .ok_or_else(|| {
            VentaError::InvalidLineInput(format!(
                "converted amount out of range: {} at rate {}",
                amount, tipo_cambio
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_currency_unchanged() {
        assert_eq!(convert(12.345, Moneda::Pen, Moneda::Pen, 3.75).unwrap(), 12.345);
        assert_eq!(convert(8.0, Moneda::Usd, Moneda::Usd, 3.75).unwrap(), 8.0);
    }

    #[test]
    fn test_usd_to_local_multiplies() {
        assert_eq!(convert(10.0, Moneda::Usd, Moneda::Pen, 3.75).unwrap(), 37.5);
        assert_eq!(convert(1.99, Moneda::Usd, Moneda::Pen, 3.712).unwrap(), 7.39);
    }

    #[test]
    fn test_local_to_usd_divides() {
        assert_eq!(convert(37.5, Moneda::Pen, Moneda::Usd, 3.75).unwrap(), 10.0);
        // 10 / 3 = 3.333.. -> 3.33
        assert_eq!(convert(10.0, Moneda::Pen, Moneda::Usd, 3.0).unwrap(), 3.33);
        // 20 / 3 = 6.666.. -> 6.67
        assert_eq!(convert(20.0, Moneda::Pen, Moneda::Usd, 3.0).unwrap(), 6.67);
    }

    #[test]
    fn test_invalid_rate() {
        for rate in [0.0, -3.75, f64::NAN, f64::INFINITY] {
            let err = convert(10.0, Moneda::Usd, Moneda::Pen, rate).unwrap_err();
            assert!(matches!(err, VentaError::InvalidRate(_)));
        }
        assert!(convert(10.0, Moneda::Pen, Moneda::Pen, 0.0).is_err());
    }

    #[test]
    fn test_out_of_range_amounts_are_rejected() {
        assert!(matches!(
            convert(1e15, Moneda::Usd, Moneda::Pen, 1e15),
            Err(VentaError::InvalidLineInput(_))
        ));
        assert!(matches!(
            convert(1e27, Moneda::Pen, Moneda::Usd, 1e-20),
            Err(VentaError::InvalidLineInput(_))
        ));
        assert!(matches!(
            convert(1e40, Moneda::Usd, Moneda::Pen, 3.75),
            Err(VentaError::InvalidLineInput(_))
        ));
        assert!(convert(f64::NAN, Moneda::Usd, Moneda::Pen, 3.75).is_err());
    }
}
