use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use leanix_mtm_mcp::auth::CredentialManager;
use leanix_mtm_mcp::config::{Config, LogFormat, Transport};
use leanix_mtm_mcp::http_client::MtmClient;
use leanix_mtm_mcp::mcp::{self, McpServer};
use leanix_mtm_mcp::tools::ToolRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    config.validate()?;

    init_logging(&config);

    tracing::info!("🚀 LeanIX MTM MCP server starting...");
    tracing::info!("LeanIX base URL: {}", config.base_url);

    let credentials = Arc::new(
        CredentialManager::new(
            config.leanix_token.clone(),
            config.base_url.clone(),
            Duration::from_secs(config.http_request_timeout),
        )
        .context("Failed to create credential manager")?,
    );
    let client = Arc::new(MtmClient::new(
        credentials.clone(),
        config.http_connect_timeout,
        config.http_request_timeout,
    )?);

    tracing::info!("Initializing LeanIX connection...");
    if let Err(e) = client.initialize().await {
        tracing::error!("❌ Failed to establish LeanIX connection: {}", e);
        tracing::error!("");
        tracing::error!("🔧 Troubleshooting steps:");
        tracing::error!("   1. Check your network connection");
        tracing::error!("   2. Verify LEANIX_TOKEN is a valid, unexpired API token");
        tracing::error!(
            "   3. Verify LEANIX_INSTANCE matches your workspace URL (currently '{}')",
            config.leanix_instance
        );
        tracing::error!("");
        anyhow::bail!("Startup failed: unable to obtain a LeanIX access token");
    }
    tracing::info!("✅ LeanIX connection established");

    if let Some(role) = config.required_role.as_deref() {
        check_role(&credentials, role).await?;
    }

    let server = McpServer::new(ToolRegistry::new(client));

    match config.transport {
        Transport::Stdio => {
            tracing::info!("Serving MCP over stdio");
            mcp::stdio::serve_stdio(server).await?;
        }
        Transport::Http => serve_http(&config, server).await?,
    }

    Ok(())
}

/// Install the tracing subscriber; stdout is reserved for the protocol
fn init_logging(config: &Config) {
    let log_level = config.log_level.to_lowercase();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.with_file(true).with_line_number(true).init(),
    }
}

/// Refuse to serve unless the token principal holds `required`
async fn check_role(credentials: &CredentialManager, required: &str) -> Result<()> {
    tracing::info!("Validating user permissions...");

    let claims = credentials
        .decode_principal()
        .await
        .context("Unable to read the principal role from the LeanIX access token")?;

    if !claims.has_role(required) {
        let role = claims.role().unwrap_or("unknown");
        tracing::error!(
            "❌ Access denied: user role '{}' is not authorized. Only {} users can use this MCP server.",
            role,
            required
        );
        anyhow::bail!("Principal role '{}' does not match required role '{}'", role, required);
    }

    if let Some(principal) = claims.principal.as_ref() {
        tracing::info!(
            "✅ User {} has {} role",
            principal.username.as_deref().unwrap_or("<unknown>"),
            required
        );
    }
    if let Some(expires_at) = credentials.expires_at().await {
        tracing::debug!("Access token valid until {}", expires_at);
    }
    Ok(())
}

async fn serve_http(config: &Config, server: McpServer) -> Result<()> {
    let app = mcp::http::build_app(mcp::http::AppState {
        mcp: server,
        api_key: config.api_key.clone(),
    });

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    if config.api_key.is_none() {
        tracing::warn!("MCP_API_KEY is not set, the HTTP endpoint is unauthenticated");
    }
    tracing::info!("🚀 Server listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signal
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown...");
        },
    }
}
