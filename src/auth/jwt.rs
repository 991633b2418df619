// Local (unverified) JWT claim decoding

use base64::Engine;

use super::types::Claims;
use crate::error::ClientError;

/// Decode the payload segment of a JWT without verifying its signature.
/// Padded and unpadded base64url segments are both accepted.
pub fn decode_claims(token: &str) -> Result<Claims, ClientError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ClientError::TokenDecodeFailure(format!(
            "invalid JWT format: expected 3 segments, found {}",
            parts.len()
        )));
    }

    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let payload_bytes = engine
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| ClientError::TokenDecodeFailure(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice(&payload_bytes)
        .map_err(|e| ClientError::TokenDecodeFailure(format!("payload is not JSON: {}", e)))
}

#[cfg(test)]
pub(crate) fn encode_test_token(payload: &serde_json::Value) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.{}",
        engine.encode(br#"{"alg":"RS256","typ":"JWT"}"#),
        engine.encode(payload.to_string()),
        engine.encode(b"signature")
    )
}
