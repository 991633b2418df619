// Authentication types

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Cached bearer credential
///
/// `access_token == None` means the credential is empty or was invalidated.
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub access_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// A credential that can never be used
    pub fn empty() -> Self {
        Self {
            access_token: None,
            expires_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// Usable only while `now < expires_at`
    pub fn valid_at(&self, now: DateTime<Utc>) -> Option<&str> {
        match self.access_token {
            Some(ref token) if now < self.expires_at => Some(token.as_str()),
            _ => None,
        }
    }
}

/// Token data produced by a successful mint
#[derive(Debug, Clone)]
pub struct TokenData {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// OAuth2 client-credentials token response
#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

/// Claims carried in the access token payload
///
/// Only the fields this server reads are typed; everything else is kept
/// in `extra` so callers see exactly what the issuer encoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub principal: Option<Principal>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Role of the token principal, if the issuer included one
    pub fn role(&self) -> Option<&str> {
        self.principal.as_ref().and_then(|p| p.role.as_deref())
    }

    /// Whether the principal holds `role` (case-insensitive)
    pub fn has_role(&self, role: &str) -> bool {
        self.role().is_some_and(|r| r.eq_ignore_ascii_case(role))
    }
}

/// The principal (user or technical user) the token was issued to
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Principal {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub account: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_empty_token_never_valid() {
        let token = CachedToken::empty();
        assert!(token.valid_at(Utc::now()).is_none());
        assert!(token.valid_at(DateTime::<Utc>::MIN_UTC).is_none());
    }

    #[test]
    fn test_token_valid_strictly_before_expiry() {
        let now = Utc::now();
        let token = CachedToken {
            access_token: Some("abc".to_string()),
            expires_at: now + Duration::seconds(1),
        };
        assert_eq!(token.valid_at(now), Some("abc"));
        assert!(token.valid_at(now + Duration::seconds(1)).is_none());
    }

    #[test]
    fn test_has_role() {
        let claims: Claims = serde_json::from_value(json!({
            "principal": {"role": "SUPERADMIN"}
        }))
        .unwrap();
        assert!(claims.has_role("SUPERADMIN"));
        assert!(claims.has_role("superadmin"));
        assert!(!claims.has_role("ADMIN"));
        assert!(!Claims::default().has_role("SUPERADMIN"));
    }
}
