use shared::models::Moneda;

/// Default exchange rate (PEN per USD) used until the operator enters the
/// day's rate
const DEFAULT_TIPO_CAMBIO: f64 = 3.75;

/// Sales defaults applied to every new order
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | ALMACEN_MONEDA | PEN | Currency new orders start in |
/// | ALMACEN_TIPO_CAMBIO | 3.75 | PEN per USD |
#[derive(Debug, Clone, PartialEq)]
pub struct SalesConfig {
    /// Currency new orders start in
    pub moneda: Moneda,
    /// Exchange rate new orders start with (local units per USD)
    pub tipo_cambio: f64,
}

impl SalesConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            moneda: std::env::var("ALMACEN_MONEDA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.moneda),
            tipo_cambio: std::env::var("ALMACEN_TIPO_CAMBIO")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|r| r.is_finite() && *r > 0.0)
                .unwrap_or(defaults.tipo_cambio),
        }
    }

    pub fn with_moneda(mut self, moneda: Moneda) -> Self {
        self.moneda = moneda;
        self
    }

    pub fn with_tipo_cambio(mut self, tipo_cambio: f64) -> Self {
        self.tipo_cambio = tipo_cambio;
        self
    }
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            moneda: Moneda::Pen,
            tipo_cambio: DEFAULT_TIPO_CAMBIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let config = SalesConfig::default();
        assert_eq!(config.moneda, Moneda::Pen);
        assert_eq!(config.tipo_cambio, 3.75);

        let config = config.with_moneda(Moneda::Usd).with_tipo_cambio(3.8);
        assert_eq!(config.moneda, Moneda::Usd);
        assert_eq!(config.tipo_cambio, 3.8);
    }
}
