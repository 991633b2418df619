// Streamable HTTP transport: JSON-RPC over POST /mcp

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::{self as axum_middleware, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{error_response, McpServer, RpcError, SERVER_NAME};
use crate::error::ApiError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// State shared by the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: McpServer,
    /// Key clients must present; `None` leaves the endpoint open
    pub api_key: Option<String>,
}

/// Build the router with all routes and middleware
pub fn build_app(state: AppState) -> Router {
    let mcp_routes = Router::new()
        .route("/mcp", post(mcp_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(mcp_routes)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Authentication middleware
///
/// Accepts "Bearer {MCP_API_KEY}" in Authorization or the key in x-api-key.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let bearer = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));
    let api_key = request
        .headers()
        .get("x-api-key")
        .and_then(|h| h.to_str().ok());

    if bearer == Some(expected) || api_key == Some(expected) {
        return Ok(next.run(request).await);
    }

    let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();
    tracing::warn!(
        "[{}] Access attempt with invalid or missing API key: {} {}",
        request_id,
        request.method(),
        request.uri().path()
    );
    Err(ApiError::AuthError("Invalid or missing API Key".to_string()))
}

/// Allow all origins, methods and headers
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// GET / - Simple status check
async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": format!("{} is running", SERVER_NAME),
        "version": VERSION
    }))
}

/// GET /health - Health check with timestamp
async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": VERSION
    }))
}

/// POST /mcp - One JSON-RPC message or batch
///
/// Notifications (and batches of only notifications) get 202 with no body.
async fn mcp_handler(State(state): State<AppState>, body: String) -> Result<Response, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::ValidationError("Request body is empty".to_string()));
    }

    let incoming: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting malformed JSON-RPC body");
            let response = error_response(
                Value::Null,
                RpcError::parse_error(format!("Parse error: {}", e)),
            );
            return Ok((StatusCode::BAD_REQUEST, Json(response)).into_response());
        }
    };

    Ok(match state.mcp.handle_message(incoming).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    })
}
