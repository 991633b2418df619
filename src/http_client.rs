use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Client, Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::auth::{token_preview, CredentialManager};
use crate::error::ClientError;

/// One attempt of a logical call
struct RequestAttempt<'a> {
    method: &'a Method,
    path: &'a str,
    body: Option<&'a Value>,
    is_retry: bool,
}

/// Authenticated HTTP client for the LeanIX MTM API
///
/// Every request carries a valid bearer token. A 403 on the first attempt
/// invalidates the token, mints a new one and retries exactly once.
pub struct MtmClient {
    /// Shared HTTP client with connection pooling
    client: Client,

    /// Credential manager (sole owner of the token)
    credentials: Arc<CredentialManager>,

    /// Set once the startup mint succeeded
    initialized: OnceCell<()>,
}

impl MtmClient {
    /// Create a new client
    pub fn new(
        credentials: Arc<CredentialManager>,
        connect_timeout: u64,
        request_timeout: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout))
            .timeout(Duration::from_secs(request_timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(credentials, client))
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(credentials: Arc<CredentialManager>, client: Client) -> Self {
        Self {
            client,
            credentials,
            initialized: OnceCell::new(),
        }
    }

    /// Obtain the first access token. Must complete before any request.
    /// Calling it again after success is a no-op.
    pub async fn initialize(&self) -> Result<(), ClientError> {
        self.initialized
            .get_or_try_init(|| async {
                let token = self.credentials.mint().await?;
                tracing::info!(
                    "LeanIX client initialized (token: {})",
                    token_preview(&token)
                );
                Ok::<(), ClientError>(())
            })
            .await?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.initialized()
    }

    /// Credential manager backing this client
    pub fn credentials(&self) -> &Arc<CredentialManager> {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        self.credentials.base_url()
    }

    /// GET convenience wrapper
    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.execute(Method::GET, path, None).await
    }

    /// POST convenience wrapper
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, ClientError> {
        self.execute(Method::POST, path, body).await
    }

    /// Perform one logical call, recovering once from a 403.
    /// The response payload is returned unchanged.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        if !self.is_initialized() {
            return Err(ClientError::UninitializedClient);
        }

        let mut attempt = RequestAttempt {
            method: &method,
            path,
            body,
            is_retry: false,
        };

        match self.send(&attempt).await {
            Err(ClientError::AuthorizationRejected { message, .. }) => {
                tracing::warn!(
                    method = %method,
                    path = %path,
                    upstream_message = %message,
                    "Received 403, refreshing token and retrying once"
                );

                self.credentials.invalidate().await;
                self.credentials.mint().await?;

                attempt.is_retry = true;
                self.send(&attempt).await
            }
            result => result,
        }
    }

    /// Send a single attempt with the current token
    async fn send(&self, attempt: &RequestAttempt<'_>) -> Result<Value, ClientError> {
        let token = self.credentials.get_valid_token().await?;
        let url = join_url(self.base_url(), attempt.path);

        tracing::debug!(
            method = %attempt.method,
            url = %url,
            retry = attempt.is_retry,
            "Sending LeanIX API request"
        );

        let mut request = self
            .client
            .request(attempt.method.clone(), &url)
            .bearer_auth(&token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = attempt.body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let error_kind = classify_error(&e);
                tracing::error!(
                    error_kind = error_kind,
                    error = %e,
                    url = %url,
                    retry = attempt.is_retry,
                    "LeanIX API request error"
                );
                return Err(ClientError::UpstreamRequestFailure {
                    method: attempt.method.to_string(),
                    path: attempt.path.to_string(),
                    status: None,
                    message: format!("{} (kind: {})", e, error_kind),
                });
            }
        };

        let status = response.status();
        let text = response.text().await.map_err(|e| ClientError::UpstreamRequestFailure {
            method: attempt.method.to_string(),
            path: attempt.path.to_string(),
            status: Some(status.as_u16()),
            message: format!("failed to read response body: {}", e),
        })?;

        if status.is_success() {
            tracing::debug!(status = %status, "LeanIX API request successful");
            return Ok(parse_payload(&text));
        }

        let message = if text.is_empty() {
            status.to_string()
        } else {
            format!("{} - {}", status, text)
        };

        if status == StatusCode::FORBIDDEN {
            if attempt.is_retry {
                tracing::error!(
                    url = %url,
                    response_body = %text,
                    "Authorization still rejected after token refresh"
                );
            }
            return Err(ClientError::AuthorizationRejected {
                method: attempt.method.to_string(),
                path: attempt.path.to_string(),
                message,
            });
        }

        tracing::error!(
            status = status.as_u16(),
            url = %url,
            response_body = %text,
            "LeanIX API request failed with error response"
        );
        Err(ClientError::UpstreamRequestFailure {
            method: attempt.method.to_string(),
            path: attempt.path.to_string(),
            status: Some(status.as_u16()),
            message,
        })
    }
}

/// Join base URL and API path, tolerating a missing leading slash
fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}

/// JSON payload as-is; empty body is `null`, anything else a string
fn parse_payload(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Categorize a transport error for logs
fn classify_error(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connection_failed"
    } else if e.is_request() {
        "request_error"
    } else if e.is_body() {
        "body_error"
    } else if e.is_decode() {
        "decode_error"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ManualClock;
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const TOKEN_PATH: &str = "/services/mtm/v1/oauth2/token";
    const ACCOUNTS_PATH: &str = "/services/mtm/v1/accounts";

    fn client_for(server: &ServerGuard) -> MtmClient {
        let credentials = Arc::new(CredentialManager::with_client(
            "secret".to_string(),
            server.url(),
            Client::new(),
            Arc::new(ManualClock::default()),
        ));
        MtmClient::with_client(credentials, Client::new())
    }

    async fn token_mock(server: &mut ServerGuard, token: &str, hits: usize) -> Mock {
        server
            .mock("POST", TOKEN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"access_token": token, "expires_in": 3600}).to_string())
            .expect(hits)
            .create_async()
            .await
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://app.leanix.net", "/a"), "https://app.leanix.net/a");
        assert_eq!(join_url("https://app.leanix.net", "a"), "https://app.leanix.net/a");
    }

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload(""), Value::Null);
        assert_eq!(parse_payload(r#"{"data":[]}"#), json!({"data": []}));
        assert_eq!(parse_payload("plain"), json!("plain"));
    }

    #[tokio::test]
    async fn test_execute_before_initialize_fails_without_network() {
        let mut server = Server::new_async().await;
        let token = token_mock(&mut server, "tok", 0).await;
        let resource = server
            .mock("GET", ACCOUNTS_PATH)
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.get(ACCOUNTS_PATH).await.unwrap_err();

        assert!(matches!(err, ClientError::UninitializedClient));
        token.assert_async().await;
        resource.assert_async().await;
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let mut server = Server::new_async().await;
        let token = token_mock(&mut server, "tok", 1).await;

        let client = client_for(&server);
        client.initialize().await.unwrap();
        client.initialize().await.unwrap();

        assert!(client.is_initialized());
        token.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_initialize_can_be_retried() {
        let mut server = Server::new_async().await;
        let failing = server
            .mock("POST", TOKEN_PATH)
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.initialize().await.unwrap_err();
        assert!(matches!(err, ClientError::CredentialMintFailure(_)));
        assert!(!client.is_initialized());

        failing.remove_async().await;
        let _token = token_mock(&mut server, "tok", 1).await;
        client.initialize().await.unwrap();
        assert!(client.is_initialized());
    }

    #[tokio::test]
    async fn test_get_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let _token = token_mock(&mut server, "tok-1", 1).await;
        let resource = server
            .mock("GET", ACCOUNTS_PATH)
            .match_header("authorization", "Bearer tok-1")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(r#"{"status":"OK","data":[{"id":"a1"}],"total":1}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        client.initialize().await.unwrap();
        let result = client.get(ACCOUNTS_PATH).await.unwrap();

        assert_eq!(result["data"][0]["id"], "a1");
        assert_eq!(result["total"], 1);
        resource.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = Server::new_async().await;
        let _token = token_mock(&mut server, "tok", 1).await;
        let resource = server
            .mock("POST", "/services/mtm/v1/workspaces")
            .match_body(Matcher::Json(json!({"name": "ws"})))
            .with_status(200)
            .with_body(r#"{"status":"OK"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client.initialize().await.unwrap();
        let result = client
            .post("/services/mtm/v1/workspaces", Some(&json!({"name": "ws"})))
            .await
            .unwrap();

        assert_eq!(result["status"], "OK");
        resource.assert_async().await;
    }

    #[tokio::test]
    async fn test_403_refreshes_token_and_retries_once() {
        let mut server = Server::new_async().await;
        let first_token = token_mock(&mut server, "tok-1", 1).await;

        let client = client_for(&server);
        client.initialize().await.unwrap();
        first_token.assert_async().await;
        first_token.remove_async().await;

        let second_token = token_mock(&mut server, "tok-2", 1).await;
        let rejected = server
            .mock("GET", ACCOUNTS_PATH)
            .match_header("authorization", "Bearer tok-1")
            .with_status(403)
            .with_body("Forbidden")
            .expect(1)
            .create_async()
            .await;
        let accepted = server
            .mock("GET", ACCOUNTS_PATH)
            .match_header("authorization", "Bearer tok-2")
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .expect(1)
            .create_async()
            .await;

        let result = client.get(ACCOUNTS_PATH).await.unwrap();

        assert_eq!(result, json!({"data": []}));
        second_token.assert_async().await;
        rejected.assert_async().await;
        accepted.assert_async().await;
    }

    #[tokio::test]
    async fn test_persistent_403_stops_after_one_retry() {
        let mut server = Server::new_async().await;
        // initialize + one forced refresh
        let token = token_mock(&mut server, "tok", 2).await;
        let resource = server
            .mock("GET", ACCOUNTS_PATH)
            .with_status(403)
            .with_body("Forbidden")
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server);
        client.initialize().await.unwrap();
        let err = client.get(ACCOUNTS_PATH).await.unwrap_err();

        assert!(err.is_authorization_rejected());
        assert!(err.to_string().contains(ACCOUNTS_PATH));
        assert!(err.to_string().contains("Forbidden"));
        token.assert_async().await;
        resource.assert_async().await;
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        for status in [400, 401, 404, 429, 500, 503] {
            let mut server = Server::new_async().await;
            let token = token_mock(&mut server, "tok", 1).await;
            let resource = server
                .mock("GET", ACCOUNTS_PATH)
                .with_status(status)
                .with_body("nope")
                .expect(1)
                .create_async()
                .await;

            let client = client_for(&server);
            client.initialize().await.unwrap();
            let err = client.get(ACCOUNTS_PATH).await.unwrap_err();

            match err {
                ClientError::UpstreamRequestFailure {
                    status: Some(code),
                    ref path,
                    ref message,
                    ..
                } => {
                    assert_eq!(code as usize, status);
                    assert_eq!(path, ACCOUNTS_PATH);
                    assert!(message.contains("nope"));
                }
                other => panic!("unexpected error for {}: {:?}", status, other),
            }
            token.assert_async().await;
            resource.assert_async().await;
        }
    }

    #[tokio::test]
    async fn test_mint_failure_during_retry_is_surfaced() {
        let mut server = Server::new_async().await;
        let first_token = token_mock(&mut server, "tok", 1).await;
        let client = client_for(&server);
        client.initialize().await.unwrap();
        first_token.remove_async().await;

        let _failing = server
            .mock("POST", TOKEN_PATH)
            .with_status(500)
            .create_async()
            .await;
        let _resource = server
            .mock("GET", ACCOUNTS_PATH)
            .with_status(403)
            .create_async()
            .await;

        let err = client.get(ACCOUNTS_PATH).await.unwrap_err();
        assert!(matches!(err, ClientError::CredentialMintFailure(_)));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let mut server = Server::new_async().await;
        let _token = token_mock(&mut server, "tok", 1).await;
        let _resource = server
            .mock("GET", ACCOUNTS_PATH)
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server);
        client.initialize().await.unwrap();
        assert_eq!(client.get(ACCOUNTS_PATH).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_unreachable_token_endpoint() {
        let credentials = Arc::new(CredentialManager::with_client(
            "secret".to_string(),
            "http://127.0.0.1:1".to_string(),
            Client::new(),
            Arc::new(ManualClock::default()),
        ));
        let client = MtmClient::with_client(credentials, Client::new());

        let err = client.initialize().await.unwrap_err();
        assert!(matches!(err, ClientError::CredentialMintFailure(_)));
        assert!(!client.is_initialized());
    }

    /// Upstream that serves tokens but never answers API requests
    async fn stalled_upstream(api_hits: Arc<AtomicUsize>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let api_hits = api_hits.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let head = String::from_utf8_lossy(&buf[..n]);
                    if head.starts_with(&format!("POST {}", TOKEN_PATH)) {
                        let body = r#"{"access_token":"tok","expires_in":3600}"#;
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                    } else {
                        api_hits.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                });
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_request_timeout_is_not_retried() {
        let api_hits = Arc::new(AtomicUsize::new(0));
        let base_url = stalled_upstream(api_hits.clone()).await;
        let credentials = Arc::new(CredentialManager::with_client(
            "secret".to_string(),
            base_url,
            Client::new(),
            Arc::new(ManualClock::default()),
        ));
        let http = Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let client = MtmClient::with_client(credentials, http);
        client.initialize().await.unwrap();

        let err = client.get(ACCOUNTS_PATH).await.unwrap_err();

        match err {
            ClientError::UpstreamRequestFailure {
                status, message, ..
            } => {
                assert_eq!(status, None);
                assert!(message.contains("(kind: timeout)"), "{}", message);
            }
            other => panic!("expected upstream failure, got {:?}", other),
        }
        assert_eq!(api_hits.load(Ordering::SeqCst), 1);
    }
}
