//! Cart aggregator
//!
//! Owns the ordered lines of one in-progress order. Every mutation validates
//! first, then applies, then recomputes the order totals, so a failed call
//! leaves the cart exactly as it was and [`Cart::totals`] is always current.

use serde::Serialize;
use shared::models::{DetalleVenta, Moneda, Producto};

use crate::currency::{convert, validate_rate};
use crate::error::{Advisory, VentaError, VentaResult};
use crate::money::to_decimal;
use crate::pricing::{OrderTotals, compute_subtotal, validate_discount, validate_price, validate_quantity};
use crate::stock::{check_availability, low_stock_advisory};

/// One product line of the cart
///
/// `subtotal` is derived from the other fields and only changes through
/// [`Cart`] mutations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    producto: Producto,
    cantidad: i32,
    precio_unitario: f64,
    descuento: f64,
    subtotal: f64,
}

impl CartLine {
    fn new(producto: Producto, cantidad: i32, precio_unitario: f64, descuento: f64) -> VentaResult<Self> {
        let subtotal = compute_subtotal(cantidad, precio_unitario, descuento)?;
        Ok(Self {
            producto,
            cantidad,
            precio_unitario,
            descuento,
            subtotal,
        })
    }

    /// Same line with some fields replaced, subtotal recomputed
    fn with(&self, cantidad: i32, precio_unitario: f64, descuento: f64) -> VentaResult<Self> {
        Self::new(self.producto.clone(), cantidad, precio_unitario, descuento)
    }

    pub fn producto(&self) -> &Producto {
        &self.producto
    }

    pub fn cantidad(&self) -> i32 {
        self.cantidad
    }

    /// Unit price in the cart currency
    pub fn precio_unitario(&self) -> f64 {
        self.precio_unitario
    }

    /// Discount percentage (0-100)
    pub fn descuento(&self) -> f64 {
        self.descuento
    }

    pub fn subtotal(&self) -> f64 {
        self.subtotal
    }

    pub fn to_detalle(&self) -> DetalleVenta {
        DetalleVenta {
            producto_id: self.producto.id,
            codigo: self.producto.codigo.clone(),
            nombre: self.producto.nombre.clone(),
            cantidad: self.cantidad,
            precio_unitario: self.precio_unitario,
            descuento: self.descuento,
            subtotal: self.subtotal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    moneda: Moneda,
    tipo_cambio: f64,
    totals: OrderTotals,
}

impl Cart {
    /// Empty cart priced in `moneda` at `tipo_cambio` local units per USD
    pub fn new(moneda: Moneda, tipo_cambio: f64) -> VentaResult<Self> {
        validate_rate(tipo_cambio)?;
        Ok(Self {
            lines: Vec::new(),
            moneda,
            tipo_cambio,
            totals: OrderTotals::default(),
        })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> VentaResult<&CartLine> {
        self.lines.get(index).ok_or(VentaError::LineNotFound(index))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn moneda(&self) -> Moneda {
        self.moneda
    }

    pub fn tipo_cambio(&self) -> f64 {
        self.tipo_cambio
    }

    /// Current totals, recomputed after every mutation
    pub fn totals(&self) -> OrderTotals {
        self.totals
    }

    /// Position of the line holding `producto_id`
    pub fn position(&self, producto_id: i64) -> Option<usize> {
        self.lines.iter().position(|l| l.producto.id == producto_id)
    }

    pub fn to_detalles(&self) -> Vec<DetalleVenta> {
        self.lines.iter().map(CartLine::to_detalle).collect()
    }

    /// Add `requested` units of `producto`
    ///
    /// A product already in the cart gets its quantity increased instead of a
    /// second line. Quantities beyond on-hand stock are capped and reported
    /// as [`Advisory::StockCapReached`].
    pub fn add_line(&mut self, producto: &Producto, requested: i32) -> VentaResult<Vec<Advisory>> {
        validate_quantity(requested)?;
        if !producto.has_stock() {
            return Err(VentaError::OutOfStock(producto.nombre.clone()));
        }

        let existing = self.position(producto.id);
        let desired = match existing {
            Some(index) => self.lines[index].cantidad.saturating_add(requested),
            None => requested,
        };
        let availability = check_availability(producto, desired);
        let cantidad = desired.min(availability.max_allowed);

        let mut advisories = Vec::new();
        if desired > availability.max_allowed {
            advisories.push(Advisory::StockCapReached {
                producto_id: producto.id,
                nombre: producto.nombre.clone(),
                requested: desired,
                max_allowed: availability.max_allowed,
            });
        }

        let line = match existing {
            Some(index) => {
                let current = &self.lines[index];
                CartLine::new(producto.clone(), cantidad, current.precio_unitario, current.descuento)?
            }
            None => {
                let precio = convert(producto.precio_venta, producto.moneda, self.moneda, self.tipo_cambio)?;
                CartLine::new(producto.clone(), cantidad, precio, 0.0)?
            }
        };

        match existing {
            Some(index) => self.lines[index] = line,
            None => self.lines.push(line),
        }
        advisories.extend(low_stock_advisory(producto, cantidad));
        self.recompute();

        tracing::debug!(
            producto_id = producto.id,
            cantidad,
            merged = existing.is_some(),
            total = self.totals.total,
            "Cart line added"
        );
        Ok(advisories)
    }

    pub fn remove_line(&mut self, index: usize) -> VentaResult<CartLine> {
        if index >= self.lines.len() {
            return Err(VentaError::LineNotFound(index));
        }
        let removed = self.lines.remove(index);
        self.recompute();
        tracing::debug!(producto_id = removed.producto.id, "Cart line removed");
        Ok(removed)
    }

    /// Set a line quantity, clamped to `[1, stock_actual]`
    pub fn set_quantity(&mut self, index: usize, cantidad: i32) -> VentaResult<Vec<Advisory>> {
        let current = self.line(index)?;
        let max_allowed = current.producto.stock_actual.max(1);
        let clamped = cantidad.clamp(1, max_allowed);

        let mut advisories = Vec::new();
        if cantidad > max_allowed {
            advisories.push(Advisory::StockCapReached {
                producto_id: current.producto.id,
                nombre: current.producto.nombre.clone(),
                requested: cantidad,
                max_allowed,
            });
        }
        advisories.extend(low_stock_advisory(&current.producto, clamped));

        let line = current.with(clamped, current.precio_unitario, current.descuento)?;
        self.lines[index] = line;
        self.recompute();
        Ok(advisories)
    }

    /// Set a line discount percentage (0-100)
    pub fn set_discount(&mut self, index: usize, descuento: f64) -> VentaResult<()> {
        validate_discount(descuento)?;
        let current = self.line(index)?;
        let line = current.with(current.cantidad, current.precio_unitario, descuento)?;
        self.lines[index] = line;
        self.recompute();
        Ok(())
    }

    /// Override a line unit price (cart currency)
    pub fn set_unit_price(&mut self, index: usize, precio_unitario: f64) -> VentaResult<()> {
        validate_price(precio_unitario)?;
        let current = self.line(index)?;
        let line = current.with(current.cantidad, precio_unitario, current.descuento)?;
        self.lines[index] = line;
        self.recompute();
        Ok(())
    }

    /// Re-price every line for a new currency or exchange rate
    ///
    /// Prices are always re-derived from each product's base price, never
    /// from the previous converted price, so repeated calls do not drift.
    /// Manual price overrides are replaced.
    pub fn recalculate_all(&mut self, moneda: Moneda, tipo_cambio: f64) -> VentaResult<()> {
        validate_rate(tipo_cambio)?;
        let lines = self
            .lines
            .iter()
            .map(|line| {
                let precio = convert(line.producto.precio_venta, line.producto.moneda, moneda, tipo_cambio)?;
                line.with(line.cantidad, precio, line.descuento)
            })
            .collect::<VentaResult<Vec<_>>>()?;

        self.lines = lines;
        self.moneda = moneda;
        self.tipo_cambio = tipo_cambio;
        self.recompute();
        tracing::debug!(moneda = %moneda, tipo_cambio, total = self.totals.total, "Cart re-priced");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.totals = OrderTotals::from_lines(self.lines.iter().map(|l| to_decimal(l.subtotal)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producto(id: i64, stock_actual: i32, precio_venta: f64, moneda: Moneda) -> Producto {
        Producto {
            id,
            codigo: format!("P-{:03}", id),
            nombre: format!("Producto {}", id),
            stock_actual,
            stock_minimo: 1,
            precio_venta,
            moneda,
            activo: true,
        }
    }

    fn cart() -> Cart {
        Cart::new(Moneda::Pen, 3.75).unwrap()
    }

    #[test]
    fn test_single_line_totals() {
        let mut cart = cart();
        let advisories = cart.add_line(&producto(1, 20, 10.0, Moneda::Pen), 3).unwrap();
        assert!(advisories.is_empty());

        let totals = cart.totals();
        assert_eq!(cart.line(0).unwrap().subtotal(), 30.0);
        assert_eq!(totals.total, 30.0);
        assert_eq!(totals.igv, 4.58);
        assert_eq!(totals.subtotal, 25.42);
    }

    #[test]
    fn test_out_of_stock_leaves_cart_unchanged() {
        let mut cart = cart();
        cart.add_line(&producto(1, 5, 10.0, Moneda::Pen), 1).unwrap();
        let before = cart.clone();

        let err = cart.add_line(&producto(2, 0, 10.0, Moneda::Pen), 1).unwrap_err();
        assert!(matches!(err, VentaError::OutOfStock(_)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_merge_existing_line_and_cap() {
        let mut cart = cart();
        let p = producto(1, 5, 2.5, Moneda::Pen);
        cart.add_line(&p, 3).unwrap();
        let advisories = cart.add_line(&p, 4).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(0).unwrap().cantidad(), 5);
        assert!(advisories.iter().any(|a| matches!(
            a,
            Advisory::StockCapReached {
                requested: 7,
                max_allowed: 5,
                ..
            }
        )));
        assert_eq!(cart.totals().total, 12.5);
    }

    #[test]
    fn test_usd_product_converted_on_add() {
        let mut cart = cart();
        cart.add_line(&producto(1, 10, 10.0, Moneda::Usd), 2).unwrap();
        assert_eq!(cart.line(0).unwrap().precio_unitario(), 37.5);
        assert_eq!(cart.totals().total, 75.0);
    }

    #[test]
    fn test_high_stock_and_expensive_usd_product() {
        let mut cart = cart();
        cart.add_line(&producto(1, 20_000, 1.0, Moneda::Pen), 10_000).unwrap();
        cart.add_line(&producto(1, 20_000, 1.0, Moneda::Pen), 500).unwrap();
        assert_eq!(cart.line(0).unwrap().cantidad(), 10_500);

        let advisories = cart.set_quantity(0, 12_000).unwrap();
        assert!(advisories.is_empty());
        assert_eq!(cart.line(0).unwrap().cantidad(), 12_000);
        assert_eq!(cart.totals().total, 12_000.0);

        cart.add_line(&producto(2, 3, 400_000.0, Moneda::Usd), 1).unwrap();
        assert_eq!(cart.line(1).unwrap().precio_unitario(), 1_500_000.0);
        cart.set_unit_price(1, 1_600_000.0).unwrap();
        assert_eq!(cart.totals().total, 1_612_000.0);
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut cart = cart();
        cart.add_line(&producto(1, 8, 1.0, Moneda::Pen), 2).unwrap();

        let advisories = cart.set_quantity(0, 50).unwrap();
        assert_eq!(cart.line(0).unwrap().cantidad(), 8);
        assert!(matches!(advisories[0], Advisory::StockCapReached { max_allowed: 8, .. }));

        cart.set_quantity(0, 0).unwrap();
        assert_eq!(cart.line(0).unwrap().cantidad(), 1);
        assert_eq!(cart.totals().total, 1.0);
    }

    #[test]
    fn test_invalid_discount_is_atomic() {
        let mut cart = cart();
        cart.add_line(&producto(1, 8, 10.0, Moneda::Pen), 2).unwrap();
        cart.set_discount(0, 10.0).unwrap();
        assert_eq!(cart.totals().total, 18.0);

        let before = cart.clone();
        assert!(cart.set_discount(0, 120.0).is_err());
        assert!(cart.set_unit_price(0, -1.0).is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_unit_price_override() {
        let mut cart = cart();
        cart.add_line(&producto(1, 8, 10.0, Moneda::Pen), 2).unwrap();
        cart.set_unit_price(0, 9.5).unwrap();
        assert_eq!(cart.totals().total, 19.0);
    }

    #[test]
    fn test_remove_and_missing_line() {
        let mut cart = cart();
        cart.add_line(&producto(1, 8, 10.0, Moneda::Pen), 1).unwrap();
        cart.add_line(&producto(2, 8, 5.0, Moneda::Pen), 1).unwrap();

        let removed = cart.remove_line(0).unwrap();
        assert_eq!(removed.producto().id, 1);
        assert_eq!(cart.totals().total, 5.0);
        assert!(matches!(cart.remove_line(3), Err(VentaError::LineNotFound(3))));

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.totals().is_zero());
    }

    #[test]
    fn test_recalculate_all_is_idempotent() {
        let mut cart = cart();
        cart.add_line(&producto(1, 10, 33.33, Moneda::Pen), 3).unwrap();
        cart.add_line(&producto(2, 10, 7.77, Moneda::Usd), 2).unwrap();

        cart.recalculate_all(Moneda::Usd, 3.7).unwrap();
        let first = cart.totals();
        cart.recalculate_all(Moneda::Usd, 3.7).unwrap();
        assert_eq!(cart.totals(), first);

        // Round trip back to local currency restores the base prices
        cart.recalculate_all(Moneda::Pen, 3.7).unwrap();
        assert_eq!(cart.line(0).unwrap().precio_unitario(), 33.33);
    }

    #[test]
    fn test_recalculate_invalid_rate_is_atomic() {
        let mut cart = cart();
        cart.add_line(&producto(1, 10, 10.0, Moneda::Usd), 1).unwrap();
        let before = cart.clone();
        assert!(matches!(
            cart.recalculate_all(Moneda::Pen, 0.0),
            Err(VentaError::InvalidRate(_))
        ));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_low_stock_advisory() {
        let mut cart = cart();
        let advisories = cart.add_line(&producto(1, 3, 1.0, Moneda::Pen), 2).unwrap();
        assert!(matches!(advisories[0], Advisory::LowStock { remaining: 1, .. }));
    }
}
