use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use super::clock::{Clock, SystemClock};
use super::jwt;
use super::mint;
use super::types::{CachedToken, Claims};
use crate::error::ClientError;

/// Credential manager
/// Owns the bearer token for the process: mints, caches, invalidates
pub struct CredentialManager {
    /// Long-lived API token used to mint bearer tokens
    api_token: String,

    /// Service base URL, e.g. https://app.leanix.net
    base_url: String,

    /// Current bearer token and its expiry
    cached: RwLock<CachedToken>,

    /// Serialises mints so concurrent refreshes don't stampede the token endpoint
    mint_lock: Mutex<()>,

    /// HTTP client for token requests
    client: Client,

    clock: Arc<dyn Clock>,
}

impl CredentialManager {
    /// Create an empty credential manager (no token until the first mint)
    pub fn new(api_token: String, base_url: String, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ClientError::CredentialMintFailure(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self::with_client(
            api_token,
            base_url,
            client,
            Arc::new(SystemClock),
        ))
    }

    /// Create a credential manager with an explicit HTTP client and clock
    pub fn with_client(
        api_token: String,
        base_url: String,
        client: Client,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            api_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            cached: RwLock::new(CachedToken::empty()),
            mint_lock: Mutex::new(()),
            client,
            clock,
        }
    }

    /// Service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Mint a new token unconditionally and store it.
    /// On failure the previously cached token is left untouched.
    pub async fn mint(&self) -> Result<String, ClientError> {
        let _guard = self.mint_lock.lock().await;
        self.mint_locked().await
    }

    async fn mint_locked(&self) -> Result<String, ClientError> {
        let issued_at = self.clock.now();
        let token_data =
            mint::mint_access_token(&self.client, &self.base_url, &self.api_token, issued_at)
                .await?;

        let mut cached = self.cached.write().await;
        *cached = CachedToken {
            access_token: Some(token_data.access_token.clone()),
            expires_at: token_data.expires_at,
        };

        Ok(token_data.access_token)
    }

    /// Get a valid access token, minting a new one if necessary
    pub async fn get_valid_token(&self) -> Result<String, ClientError> {
        if let Some(token) = self.cached_valid_token().await {
            return Ok(token);
        }

        let _guard = self.mint_lock.lock().await;

        // Another caller may have minted while we waited for the lock
        if let Some(token) = self.cached_valid_token().await {
            return Ok(token);
        }

        tracing::debug!("Access token missing or expired, minting a new one");
        self.mint_locked().await
    }

    async fn cached_valid_token(&self) -> Option<String> {
        let now = self.clock.now();
        let cached = self.cached.read().await;
        cached.valid_at(now).map(str::to_string)
    }

    /// Drop the cached token so the next `get_valid_token()` mints
    pub async fn invalidate(&self) {
        let mut cached = self.cached.write().await;
        *cached = CachedToken::empty();
        tracing::debug!("Access token invalidated");
    }

    /// Whether a usable token is currently cached
    pub async fn has_valid_token(&self) -> bool {
        self.cached_valid_token().await.is_some()
    }

    /// Expiry of the cached token (`None` when no token is held)
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        let cached = self.cached.read().await;
        cached.access_token.as_ref().map(|_| cached.expires_at)
    }

    /// Decode the claims of the cached token (signature not verified)
    pub async fn decode_principal(&self) -> Result<Claims, ClientError> {
        let cached = self.cached.read().await;
        let token = cached.access_token.as_deref().ok_or_else(|| {
            ClientError::TokenDecodeFailure("no access token is cached".to_string())
        })?;
        jwt::decode_claims(token)
    }
}

/// Short, log-safe prefix of a token
pub fn token_preview(token: &str) -> String {
    let prefix: String = token.chars().take(12).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::clock::ManualClock;
    use crate::auth::jwt::encode_test_token;
    use chrono::Duration as ChronoDuration;
    use mockito::{Mock, Server, ServerGuard};
    use serde_json::json;

    const TOKEN_PATH: &str = "/services/mtm/v1/oauth2/token";

    fn manager(server: &ServerGuard, clock: Arc<ManualClock>) -> CredentialManager {
        CredentialManager::with_client(
            "secret".to_string(),
            server.url(),
            Client::new(),
            clock,
        )
    }

    async fn token_mock(server: &mut ServerGuard, body: &str, hits: usize) -> Mock {
        server
            .mock("POST", TOKEN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let server = Server::new_async().await;
        let manager = manager(&server, Arc::new(ManualClock::default()));

        assert!(!manager.has_valid_token().await);
        assert!(manager.expires_at().await.is_none());
    }

    #[tokio::test]
    async fn test_short_token_reminted_on_every_use() {
        let mut server = Server::new_async().await;
        let mock = token_mock(&mut server, r#"{"access_token":"abc","expires_in":10}"#, 3).await;
        let clock = Arc::new(ManualClock::default());
        let manager = manager(&server, clock.clone());

        // Lifetime below the safety margin: stale as soon as it is cached
        manager.mint().await.unwrap();
        assert!(!manager.has_valid_token().await);
        assert!(manager.expires_at().await.unwrap() < clock.now());

        assert_eq!(manager.get_valid_token().await.unwrap(), "abc");
        assert_eq!(manager.get_valid_token().await.unwrap(), "abc");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_cached_token_reused_until_expiry() {
        let mut server = Server::new_async().await;
        let mock = token_mock(&mut server, r#"{"access_token":"abc","expires_in":3600}"#, 1).await;
        let clock = Arc::new(ManualClock::default());
        let manager = manager(&server, clock.clone());

        for _ in 0..5 {
            assert_eq!(manager.get_valid_token().await.unwrap(), "abc");
            clock.advance(ChronoDuration::seconds(600));
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_expiry_uses_safety_margin() {
        let mut server = Server::new_async().await;
        let _mock = token_mock(&mut server, r#"{"access_token":"abc","expires_in":3600}"#, 1).await;
        let clock = Arc::new(ManualClock::default());
        let manager = manager(&server, clock.clone());

        manager.mint().await.unwrap();
        let expected = clock.now() + ChronoDuration::seconds(3540);
        assert_eq!(manager.expires_at().await, Some(expected));

        clock.advance(ChronoDuration::seconds(3539));
        assert!(manager.has_valid_token().await);
        clock.advance(ChronoDuration::seconds(1));
        assert!(!manager.has_valid_token().await);
    }

    #[tokio::test]
    async fn test_invalidate_forces_mint() {
        let mut server = Server::new_async().await;
        let mock = token_mock(&mut server, r#"{"access_token":"abc"}"#, 2).await;
        let manager = manager(&server, Arc::new(ManualClock::default()));

        manager.get_valid_token().await.unwrap();
        manager.invalidate().await;
        assert!(!manager.has_valid_token().await);
        assert!(manager.expires_at().await.is_none());

        manager.get_valid_token().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_mint_keeps_previous_token() {
        let mut server = Server::new_async().await;
        let ok = token_mock(&mut server, r#"{"access_token":"first"}"#, 1).await;
        let manager = manager(&server, Arc::new(ManualClock::default()));
        manager.mint().await.unwrap();
        ok.remove_async().await;

        let _mock = server
            .mock("POST", TOKEN_PATH)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = manager.mint().await.unwrap_err();
        assert!(matches!(err, ClientError::CredentialMintFailure(_)));
        assert_eq!(manager.get_valid_token().await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_mint() {
        let mut server = Server::new_async().await;
        let mock = token_mock(&mut server, r#"{"access_token":"abc"}"#, 1).await;
        let manager = Arc::new(manager(&server, Arc::new(ManualClock::default())));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let manager = manager.clone();
            handles.push(tokio::spawn(async move { manager.get_valid_token().await }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "abc");
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_decode_principal_round_trip() {
        let mut server = Server::new_async().await;
        let payload = json!({
            "principal": {"username": "svc@example.com", "role": "SUPERADMIN"},
            "exp": 1_900_000_000
        });
        let body = json!({"access_token": encode_test_token(&payload), "expires_in": 3600});
        let _mock = token_mock(&mut server, &body.to_string(), 1).await;
        let manager = manager(&server, Arc::new(ManualClock::default()));

        manager.mint().await.unwrap();
        let claims = manager.decode_principal().await.unwrap();

        assert_eq!(claims.role(), Some("SUPERADMIN"));
        assert_eq!(
            claims.principal.unwrap().username.as_deref(),
            Some("svc@example.com")
        );
        assert_eq!(claims.exp, Some(1_900_000_000));
    }

    #[tokio::test]
    async fn test_decode_principal_without_token() {
        let server = Server::new_async().await;
        let manager = manager(&server, Arc::new(ManualClock::default()));

        let err = manager.decode_principal().await.unwrap_err();
        assert!(matches!(err, ClientError::TokenDecodeFailure(_)));
    }

    #[tokio::test]
    async fn test_decode_principal_opaque_token() {
        let mut server = Server::new_async().await;
        let _mock = token_mock(&mut server, r#"{"access_token":"opaque-token"}"#, 1).await;
        let manager = manager(&server, Arc::new(ManualClock::default()));

        manager.mint().await.unwrap();
        let err = manager.decode_principal().await.unwrap_err();
        assert!(err.to_string().contains("3 segments"));
    }

    #[test]
    fn test_token_preview_truncates() {
        assert_eq!(token_preview("abcdefghijklmnopqrstuvwxyz"), "abcdefghijkl...");
        assert_eq!(token_preview("abc"), "abc...");
    }
}
