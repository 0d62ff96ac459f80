//! In-memory snapshot of the product catalog and client directory

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use shared::models::{Cliente, Producto};

/// Products and clients fetched once per screen
///
/// Only active entries are kept. Lookups and searches never hit the
/// network.
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    products: Vec<Producto>,
    clients: Vec<Cliente>,
    product_index: HashMap<i64, usize>,
    client_index: HashMap<i64, usize>,
    loaded_at: Option<DateTime<Utc>>,
}

impl CatalogCache {
    pub fn load(products: Vec<Producto>, clients: Vec<Cliente>) -> Self {
        let products: Vec<Producto> = products.into_iter().filter(|p| p.activo).collect();
        let clients: Vec<Cliente> = clients.into_iter().filter(|c| c.activo).collect();
        let product_index = products.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
        let client_index = clients.iter().enumerate().map(|(i, c)| (c.id, i)).collect();

        tracing::debug!(
            products = products.len(),
            clients = clients.len(),
            "Catalog cache loaded"
        );
        Self {
            products,
            clients,
            product_index,
            client_index,
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn products(&self) -> &[Producto] {
        &self.products
    }

    pub fn clients(&self) -> &[Cliente] {
        &self.clients
    }

    pub fn product(&self, id: i64) -> Option<&Producto> {
        self.product_index.get(&id).map(|&i| &self.products[i])
    }

    pub fn client(&self, id: i64) -> Option<&Cliente> {
        self.client_index.get(&id).map(|&i| &self.clients[i])
    }

    /// Case-insensitive match on code or name; empty term returns everything
    pub fn search_products(&self, term: &str) -> Vec<&Producto> {
        let term = term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                term.is_empty()
                    || p.codigo.to_lowercase().contains(&term)
                    || p.nombre.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Case-insensitive match on name or document number
    pub fn search_clients(&self, term: &str) -> Vec<&Cliente> {
        let term = term.trim().to_lowercase();
        self.clients
            .iter()
            .filter(|c| {
                term.is_empty()
                    || c.nombre.to_lowercase().contains(&term)
                    || c.documento
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// Products at or below their reorder threshold
    pub fn low_stock(&self) -> Vec<&Producto> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn producto(id: i64, codigo: &str, nombre: &str, stock_actual: i32, activo: bool) -> Producto {
        Producto {
            id,
            codigo: codigo.into(),
            nombre: nombre.into(),
            stock_actual,
            stock_minimo: 5,
            precio_venta: 10.0,
            moneda: Default::default(),
            activo,
        }
    }

    fn cliente(id: i64, nombre: &str, documento: Option<&str>, activo: bool) -> Cliente {
        Cliente {
            id,
            nombre: nombre.into(),
            documento: documento.map(Into::into),
            telefono: None,
            activo,
        }
    }

    fn cache() -> CatalogCache {
        CatalogCache::load(
            vec![
                producto(1, "CEM-01", "Cemento Sol", 40, true),
                producto(2, "FIE-08", "Fierro 8mm", 3, true),
                producto(3, "CEM-02", "Cemento Andino", 10, false),
            ],
            vec![
                cliente(1, "Ferreteria Lopez", Some("20123456789"), true),
                cliente(2, "Juan Quispe", Some("45678912"), true),
                cliente(3, "Cliente Antiguo", None, false),
            ],
        )
    }

    #[test]
    fn test_load_keeps_active_only() {
        let cache = cache();
        assert!(cache.is_loaded());
        assert_eq!(cache.products().len(), 2);
        assert_eq!(cache.clients().len(), 2);
        assert!(cache.product(3).is_none());
        assert!(cache.client(3).is_none());
        assert_eq!(cache.product(2).map(|p| p.codigo.as_str()), Some("FIE-08"));
    }

    #[test]
    fn test_search() {
        let cache = cache();
        assert_eq!(cache.search_products("cem").len(), 1);
        assert_eq!(cache.search_products("fie-08")[0].id, 2);
        assert_eq!(cache.search_products("  ").len(), 2);
        assert_eq!(cache.search_clients("4567")[0].id, 2);
        assert_eq!(cache.search_clients("LOPEZ")[0].id, 1);
    }

    #[test]
    fn test_low_stock() {
        let cache = cache();
        let low: Vec<i64> = cache.low_stock().iter().map(|p| p.id).collect();
        assert_eq!(low, vec![2]);
        assert!(!CatalogCache::default().is_loaded());
    }
}
