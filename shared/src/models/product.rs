//! Product Model

use super::Moneda;
use serde::{Deserialize, Serialize};

/// Product as listed by the catalog
///
/// Read-only on the client: stock truth lives on the server and the cart
/// never writes back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: i64,
    pub codigo: String,
    pub nombre: String,
    /// Current on-hand quantity
    pub stock_actual: i32,
    /// Reorder threshold
    #[serde(default)]
    pub stock_minimo: i32,
    /// Unit price in `moneda`
    pub precio_venta: f64,
    /// Native currency of `precio_venta`
    #[serde(default)]
    pub moneda: Moneda,
    #[serde(default = "default_true")]
    pub activo: bool,
}

fn default_true() -> bool {
    true
}

impl Producto {
    /// Whether at least one unit is on hand
    pub fn has_stock(&self) -> bool {
        self.stock_actual > 0
    }

    /// Whether on-hand stock is at or below the reorder threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock_actual <= self.stock_minimo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producto_deserialize_camel_case() {
        let json = r#"{
            "id": 7,
            "codigo": "P-007",
            "nombre": "Cemento Sol 42.5kg",
            "stockActual": 12,
            "stockMinimo": 5,
            "precioVenta": 28.5,
            "moneda": "PEN"
        }"#;
        let p: Producto = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.stock_actual, 12);
        assert_eq!(p.precio_venta, 28.5);
        assert!(p.activo);
        assert!(p.has_stock());
        assert!(!p.is_low_stock());
    }

    #[test]
    fn test_producto_defaults() {
        let json = r#"{"id":1,"codigo":"A","nombre":"A","stockActual":0,"precioVenta":1.0}"#;
        let p: Producto = serde_json::from_str(json).unwrap();
        assert_eq!(p.moneda, Moneda::Pen);
        assert_eq!(p.stock_minimo, 0);
        assert!(!p.has_stock());
        assert!(p.is_low_stock());
    }
}
