//! Client configuration

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the warehouse API
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | ALMACEN_API_URL | http://localhost:8080 | API base URL |
/// | ALMACEN_TIMEOUT_SECS | 30 | Request timeout |
/// | ALMACEN_TOKEN | - | Bearer token of the session |
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token; wrapped into a non-expiring session credential
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("ALMACEN_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            token: std::env::var("ALMACEN_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            timeout: std::env::var("ALMACEN_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Absolute URL of an API path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("https://api.almacen.pe/")
            .with_token("abc")
            .with_timeout(5);
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout_duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("https://api.almacen.pe/");
        assert_eq!(
            config.url("/api/ventas"),
            "https://api.almacen.pe/api/ventas"
        );
        assert_eq!(
            ClientConfig::default().url("api/clientes/activos"),
            "http://localhost:8080/api/clientes/activos"
        );
    }
}
