//! Session credential passed explicitly to the HTTP layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bearer token of a logged-in session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCredential {
    pub token: String,
    /// `None` for tokens without expiry
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionCredential {
    pub fn new(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let live = SessionCredential::new("t1", Some(now + Duration::minutes(5)));
        assert!(!live.is_expired_at(now));
        assert!(live.is_expired_at(now + Duration::minutes(5)));

        let forever = SessionCredential::new("t2", None);
        assert!(!forever.is_expired());
        assert_eq!(forever.bearer(), "Bearer t2");
    }

    #[test]
    fn test_deserialize() {
        let c: SessionCredential =
            serde_json::from_str(r#"{"token":"jwt","expiresAt":"2030-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(c.token, "jwt");
        assert!(!c.is_expired());
    }
}
