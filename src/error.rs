// Error handling module
// Defines the client error taxonomy and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the authenticated LeanIX client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Token endpoint unreachable or returned an error
    #[error("Failed to obtain LeanIX access token: {0}")]
    CredentialMintFailure(String),

    /// Cached token missing or not a decodable JWT
    #[error("Failed to decode LeanIX access token: {0}")]
    TokenDecodeFailure(String),

    /// Upstream returned 403 on the original attempt and on the retry
    #[error("LeanIX API rejected authorization for {method} {path}: {message}")]
    AuthorizationRejected {
        method: String,
        path: String,
        message: String,
    },

    /// Any other network or HTTP failure
    #[error("LeanIX API request failed for {method} {path}: {message}")]
    UpstreamRequestFailure {
        method: String,
        path: String,
        status: Option<u16>,
        message: String,
    },

    /// Request attempted before `initialize()` completed
    #[error("LeanIX client must be initialized before making requests")]
    UninitializedClient,
}

impl ClientError {
    pub fn is_authorization_rejected(&self) -> bool {
        matches!(self, ClientError::AuthorizationRejected { .. })
    }

    /// Upstream HTTP status, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::AuthorizationRejected { .. } => Some(403),
            ClientError::UpstreamRequestFailure { status, .. } => *status,
            _ => None,
        }
    }
}

/// Errors produced by the HTTP transport
#[derive(Error, Debug)]
pub enum ApiError {
    /// Caller failed transport authentication
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Request body could not be parsed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::AuthError(msg) => (StatusCode::UNAUTHORIZED, "auth_error", msg),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "type": error_type,
            }
        }));

        (status, body).into_response()
    }
}
