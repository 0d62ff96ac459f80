//! Client-side stock guard
//!
//! Reads product stock, never mutates it. Inventory truth lives server-side;
//! this only keeps obviously invalid quantities out of a submission.

use serde::Serialize;
use shared::models::Producto;

use crate::error::Advisory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub ok: bool,
    /// Largest quantity that may be committed (never negative)
    pub max_allowed: i32,
}

pub fn check_availability(producto: &Producto, requested: i32) -> Availability {
    let max_allowed = producto.stock_actual.max(0);
    Availability {
        ok: requested >= 1 && requested <= max_allowed,
        max_allowed,
    }
}

/// Low-stock advisory when the stock left after committing `committed`
/// units is at or below the reorder threshold
pub fn low_stock_advisory(producto: &Producto, committed: i32) -> Option<Advisory> {
    let remaining = producto.stock_actual - committed;
    (remaining <= producto.stock_minimo).then(|| Advisory::LowStock {
        producto_id: producto.id,
        nombre: producto.nombre.clone(),
        remaining: remaining.max(0),
        stock_minimo: producto.stock_minimo,
    })
}
