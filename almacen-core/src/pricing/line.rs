use rust_decimal::Decimal;

use crate::error::{VentaError, VentaResult};
use crate::money::{checked_decimal, round_money, to_f64};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub fn validate_quantity(cantidad: i32) -> VentaResult<()> {
    if cantidad <= 0 {
        return Err(VentaError::InvalidLineInput(format!(
            "quantity must be positive, got {}",
            cantidad
        )));
    }
    Ok(())
}

pub fn validate_price(precio: f64) -> VentaResult<Decimal> {
    let value = checked_decimal(precio).ok_or_else(|| {
        VentaError::InvalidLineInput(format!("price must be a finite number, got {}", precio))
    })?;
    if value < Decimal::ZERO {
        return Err(VentaError::InvalidLineInput(format!(
            "price must be non-negative, got {}",
            precio
        )));
    }
    Ok(value)
}

pub fn validate_discount(descuento: f64) -> VentaResult<Decimal> {
    match checked_decimal(descuento) {
        Some(value) if value >= Decimal::ZERO && value <= ONE_HUNDRED => Ok(value),
        _ => Err(VentaError::InvalidLineInput(format!(
            "discount must be between 0 and 100, got {}",
            descuento
        ))),
    }
}

/// Line subtotal in Decimal, rounded to 2 decimal places
pub fn compute_subtotal_decimal(
    cantidad: i32,
    precio_unitario: f64,
    descuento: f64,
) -> VentaResult<Decimal> {
    validate_quantity(cantidad)?;
    let precio = validate_price(precio_unitario)?;
    let descuento = validate_discount(descuento)?;

    let overflow = || {
        VentaError::InvalidLineInput(format!(
            "line amount out of range: {} x {}",
            cantidad, precio_unitario
        ))
    };
    let bruto = precio.checked_mul(Decimal::from(cantidad)).ok_or_else(overflow)?;
    let neto = if descuento > Decimal::ZERO {
        let rebaja = bruto
            .checked_mul(descuento)
            .and_then(|d| d.checked_div(ONE_HUNDRED))
            .ok_or_else(overflow)?;
        bruto - rebaja
    } else {
        bruto
    };
    Ok(round_money(neto))
}

/// `cantidad * precio_unitario` minus `descuento` percent, rounded half-up
pub fn compute_subtotal(cantidad: i32, precio_unitario: f64, descuento: f64) -> VentaResult<f64> {
    compute_subtotal_decimal(cantidad, precio_unitario, descuento).map(to_f64)
}
