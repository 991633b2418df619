// Access token minting (OAuth2 client-credentials grant)

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;

use super::types::{TokenData, TokenResponse};
use crate::error::ClientError;

/// Fixed Basic-auth username for API token exchange
pub const API_TOKEN_USERNAME: &str = "apitoken";

/// Lifetime assumed when the server omits `expires_in`
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Buffer subtracted from the declared lifetime
pub const SAFETY_MARGIN_SECS: u64 = 60;

/// Get the token endpoint for a base URL
pub fn token_url(base_url: &str) -> String {
    format!("{}/services/mtm/v1/oauth2/token", base_url)
}

/// Compute the local expiry for a token issued at `issued_at`
///
/// A missing or zero `expires_in` means the default lifetime. Lifetimes
/// shorter than the safety margin yield an expiry in the past.
pub fn expires_at_for(
    issued_at: DateTime<Utc>,
    expires_in: Option<u64>,
) -> Result<DateTime<Utc>, ClientError> {
    let ttl = match expires_in {
        Some(0) | None => DEFAULT_TOKEN_TTL_SECS,
        Some(ttl) => ttl,
    };
    let out_of_range =
        || ClientError::CredentialMintFailure(format!("expires_in out of range: {}", ttl));

    let lifetime = i64::try_from(ttl)
        .ok()
        .and_then(|ttl| ttl.checked_sub(SAFETY_MARGIN_SECS as i64))
        .and_then(Duration::try_seconds)
        .ok_or_else(out_of_range)?;

    issued_at
        .checked_add_signed(lifetime)
        .ok_or_else(out_of_range)
}

/// Exchange the API token for a short-lived bearer token
pub async fn mint_access_token(
    client: &Client,
    base_url: &str,
    api_token: &str,
    issued_at: DateTime<Utc>,
) -> Result<TokenData, ClientError> {
    let url = token_url(base_url);
    tracing::debug!(url = %url, "Requesting LeanIX access token");

    let response = client
        .post(&url)
        .basic_auth(API_TOKEN_USERNAME, Some(api_token))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header(
            "User-Agent",
            concat!("leanix-mtm-mcp/", env!("CARGO_PKG_VERSION")),
        )
        .body("grant_type=client_credentials")
        .send()
        .await
        .map_err(|e| {
            ClientError::CredentialMintFailure(format!("token request failed: {}", e))
        })?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        tracing::error!(
            "Token endpoint rejected request: status={}, body={}",
            status,
            error_text
        );

        // OAuth2 error bodies carry a code and a description
        if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&error_text) {
            if let Some(error_code) = error_json.get("error").and_then(|v| v.as_str()) {
                let description = error_json
                    .get("error_description")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                return Err(ClientError::CredentialMintFailure(format!(
                    "{} - {} {}",
                    status, error_code, description
                )));
            }
        }

        return Err(ClientError::CredentialMintFailure(format!(
            "{} - {}",
            status, error_text
        )));
    }

    let data: TokenResponse = response.json().await.map_err(|e| {
        ClientError::CredentialMintFailure(format!("malformed token response: {}", e))
    })?;

    if data.access_token.is_empty() {
        return Err(ClientError::CredentialMintFailure(
            "token response does not contain access_token".to_string(),
        ));
    }

    let expires_at = expires_at_for(issued_at, data.expires_in)?;

    tracing::info!(
        "LeanIX access token obtained, expires: {}",
        expires_at.to_rfc3339()
    );

    Ok(TokenData {
        access_token: data.access_token,
        expires_at,
    })
}
