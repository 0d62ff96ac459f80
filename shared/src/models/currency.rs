//! Currency Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency a price or order is expressed in
///
/// `PEN` is the local currency; `USD` prices are converted with the
/// order's exchange rate (local units per dollar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Moneda {
    /// Sol (local currency)
    #[default]
    Pen,
    /// US dollar
    Usd,
}

impl Moneda {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pen => "PEN",
            Self::Usd => "USD",
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Pen => "S/",
            Self::Usd => "$",
        }
    }

    /// Whether this is the local currency
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Pen)
    }
}

impl fmt::Display for Moneda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown currency code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown currency code: {0}")]
pub struct UnknownMoneda(pub String);

impl FromStr for Moneda {
    type Err = UnknownMoneda;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PEN" | "S/" | "SOLES" => Ok(Self::Pen),
            "USD" | "$" | "DOLARES" => Ok(Self::Usd),
            other => Err(UnknownMoneda(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moneda_serde() {
        assert_eq!(serde_json::to_string(&Moneda::Usd).unwrap(), "\"USD\"");
        let m: Moneda = serde_json::from_str("\"PEN\"").unwrap();
        assert_eq!(m, Moneda::Pen);
    }

    #[test]
    fn test_moneda_from_str() {
        assert_eq!("usd".parse::<Moneda>().unwrap(), Moneda::Usd);
        assert_eq!(" PEN ".parse::<Moneda>().unwrap(), Moneda::Pen);
        assert!("EUR".parse::<Moneda>().is_err());
    }

    #[test]
    fn test_moneda_is_local() {
        assert!(Moneda::Pen.is_local());
        assert!(!Moneda::Usd.is_local());
        assert_eq!(Moneda::default(), Moneda::Pen);
    }
}
