//! REST implementation of the sales workflow providers
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | list_active_products | `GET api/productos/activos` |
//! | search | `GET api/productos/buscar?q=` |
//! | list_active_clients | `GET api/clientes/activos` |
//! | create_order | `POST api/ventas` |
//! | save_draft | `POST api/ventas/borrador`, `PUT api/ventas/{id}/borrador` |
//! | complete_order | `POST api/ventas/{id}/completar` |
//! | cancel_order | `POST api/ventas/{id}/anular` |
//! | register_payment | `POST api/ventas/{id}/pagos` |

use almacen_core::{ClientDirectory, OrderService, ProductCatalog};
use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{
    Cliente, CuentaPorCobrar, MetodoPago, Producto, RegistroPago, VentaPayload, VentaRecibo,
};

use crate::{ClientConfig, ClientResult, HttpClient};

fn draft_path(id: Option<&str>) -> String {
    match id {
        Some(id) => format!("api/ventas/{}/borrador", id),
        None => "api/ventas/borrador".to_string(),
    }
}

fn order_path(id: &str, action: &str) -> String {
    format!("api/ventas/{}/{}", id, action)
}

/// Warehouse API backend
#[derive(Debug, Clone)]
pub struct RestBackend {
    http: HttpClient,
}

impl RestBackend {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(HttpClient::new(config)?))
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

#[async_trait]
impl ProductCatalog for RestBackend {
    async fn list_active_products(&self) -> AppResult<Vec<Producto>> {
        Ok(self.http.get("api/productos/activos").await?)
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Producto>> {
        Ok(self
            .http
            .get_query("api/productos/buscar", &[("q", term)])
            .await?)
    }
}

#[async_trait]
impl ClientDirectory for RestBackend {
    async fn list_active_clients(&self) -> AppResult<Vec<Cliente>> {
        Ok(self.http.get("api/clientes/activos").await?)
    }
}

#[async_trait]
impl OrderService for RestBackend {
    async fn create_order(&self, payload: &VentaPayload) -> AppResult<VentaRecibo> {
        tracing::info!(estado = %payload.estado, total = payload.total, "Submitting order");
        Ok(self.http.post("api/ventas", payload).await?)
    }

    async fn save_draft(&self, payload: &VentaPayload) -> AppResult<VentaRecibo> {
        let path = draft_path(payload.id.as_deref());
        let recibo = match payload.id {
            Some(_) => self.http.put(&path, payload).await?,
            None => self.http.post(&path, payload).await?,
        };
        Ok(recibo)
    }

    async fn complete_order(&self, id: &str) -> AppResult<VentaRecibo> {
        Ok(self.http.post_empty(&order_path(id, "completar")).await?)
    }

    async fn cancel_order(&self, id: &str) -> AppResult<VentaRecibo> {
        Ok(self.http.post_empty(&order_path(id, "anular")).await?)
    }

    async fn register_payment(
        &self,
        order_id: &str,
        monto: f64,
        metodo: MetodoPago,
        cuenta: Option<&str>,
    ) -> AppResult<CuentaPorCobrar> {
        let body = RegistroPago {
            monto,
            metodo,
            cuenta: cuenta.map(str::to_string),
        };
        Ok(self.http.post(&order_path(order_id, "pagos"), &body).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(draft_path(None), "api/ventas/borrador");
        assert_eq!(draft_path(Some("V-7")), "api/ventas/V-7/borrador");
        assert_eq!(order_path("V-7", "completar"), "api/ventas/V-7/completar");
        assert_eq!(order_path("V-7", "pagos"), "api/ventas/V-7/pagos");
    }

    #[test]
    fn test_from_config() {
        let backend = RestBackend::from_config(&ClientConfig::default().with_token("jwt")).unwrap();
        assert_eq!(backend.http().credential().map(|c| c.token.as_str()), Some("jwt"));
    }
}
