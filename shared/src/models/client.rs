//! Client Model

use serde::{Deserialize, Serialize};

/// Client as listed by the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: i64,
    pub nombre: String,
    /// DNI / RUC
    #[serde(default)]
    pub documento: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

fn default_true() -> bool {
    true
}

/// Client attached to an order: a registered client or a free-text name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClienteRef {
    Registrado { id: i64, nombre: String },
    Libre { nombre: String },
}

impl ClienteRef {
    /// Reference a registered client
    pub fn registrado(cliente: &Cliente) -> Self {
        Self::Registrado {
            id: cliente.id,
            nombre: cliente.nombre.clone(),
        }
    }

    /// Free-text client name
    pub fn libre(nombre: impl Into<String>) -> Self {
        Self::Libre {
            nombre: nombre.into(),
        }
    }

    /// Display name
    pub fn nombre(&self) -> &str {
        match self {
            Self::Registrado { nombre, .. } | Self::Libre { nombre } => nombre,
        }
    }

    /// Registered client id, if any
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Registrado { id, .. } => Some(*id),
            Self::Libre { .. } => None,
        }
    }

    /// A reference is resolved when it points at a registered client or
    /// carries a non-blank name
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Registrado { .. } => true,
            Self::Libre { nombre } => !nombre.trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cliente_ref_resolution() {
        let c = Cliente {
            id: 3,
            nombre: "Ferreteria Lopez".into(),
            documento: Some("20123456789".into()),
            telefono: None,
            activo: true,
        };
        let r = ClienteRef::registrado(&c);
        assert!(r.is_resolved());
        assert_eq!(r.id(), Some(3));
        assert_eq!(r.nombre(), "Ferreteria Lopez");

        assert!(ClienteRef::libre("Juan").is_resolved());
        assert!(!ClienteRef::libre("   ").is_resolved());
        assert_eq!(ClienteRef::libre("Juan").id(), None);
    }

    #[test]
    fn test_cliente_ref_serde_tagged() {
        let json = serde_json::to_string(&ClienteRef::libre("Ana")).unwrap();
        assert_eq!(json, r#"{"tipo":"LIBRE","nombre":"Ana"}"#);
    }
}
