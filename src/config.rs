use anyhow::{Context, Result};
use clap::Parser;

/// LeanIX MTM MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// LeanIX API token
    #[arg(short = 't', long, env = "LEANIX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// LeanIX instance (the `app` in app.leanix.net)
    #[arg(short = 'i', long, env = "LEANIX_INSTANCE", default_value = "app")]
    pub instance: String,

    /// Override the LeanIX base URL
    #[arg(long, env = "LEANIX_BASE_URL")]
    pub base_url: Option<String>,

    /// Principal role required to run the server (empty disables the check)
    #[arg(long, env = "LEANIX_REQUIRED_ROLE", default_value = "SUPERADMIN")]
    pub required_role: String,

    /// MCP transport (stdio, http)
    #[arg(long, env = "MCP_TRANSPORT", default_value = "stdio")]
    pub transport: String,

    /// Server host address (http transport)
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port (http transport)
    #[arg(short, long, env = "SERVER_PORT", default_value = "8000")]
    pub port: u16,

    /// API key clients must present (http transport)
    #[arg(short = 'k', long, env = "MCP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HTTP_REQUEST_TIMEOUT", default_value = "30")]
    pub http_timeout: u64,

    /// HTTP connect timeout in seconds
    #[arg(long, env = "HTTP_CONNECT_TIMEOUT", default_value = "10")]
    pub http_connect_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    // LeanIX
    pub leanix_token: String,
    pub leanix_instance: String,
    pub base_url: String,
    pub required_role: Option<String>,

    // Transport
    pub transport: Transport,
    pub server_host: String,
    pub server_port: u16,
    pub api_key: Option<String>,

    // HTTP client
    pub http_connect_timeout: u64,
    pub http_request_timeout: u64,

    // Logging
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transport {
    Stdio,
    Http,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    /// Load configuration from all sources with priority: CLI > ENV > .env > defaults
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(args: CliArgs) -> Result<Self> {
        let leanix_token = args
            .token
            .filter(|t| !t.trim().is_empty())
            .context("LEANIX_TOKEN is required (use -t or set LEANIX_TOKEN env var)")?;

        let instance = args.instance.trim().to_string();
        let base_url = match args.base_url.filter(|u| !u.trim().is_empty()) {
            Some(url) => url.trim().trim_end_matches('/').to_string(),
            None => build_base_url(&instance),
        };

        let required_role = Some(args.required_role.trim().to_string()).filter(|r| !r.is_empty());

        Ok(Config {
            leanix_token,
            leanix_instance: instance,
            base_url,
            required_role,
            transport: parse_transport(&args.transport),
            server_host: args.host,
            server_port: args.port,
            api_key: args.api_key.filter(|k| !k.is_empty()),
            http_connect_timeout: args.http_connect_timeout,
            http_request_timeout: args.http_timeout,
            log_level: args.log_level,
            log_format: parse_log_format(&args.log_format),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.leanix_token.trim().is_empty() {
            anyhow::bail!("LEANIX_TOKEN must not be empty");
        }

        if self.leanix_instance.is_empty()
            || !self
                .leanix_instance
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            anyhow::bail!(
                "LEANIX_INSTANCE must contain only letters, digits and '-': {:?}",
                self.leanix_instance
            );
        }

        if self.http_request_timeout == 0 || self.http_connect_timeout == 0 {
            anyhow::bail!("HTTP timeouts must be greater than zero");
        }

        Ok(())
    }
}

/// Base URL for a LeanIX instance
pub fn build_base_url(instance: &str) -> String {
    format!("https://{}.leanix.net", instance)
}

/// Parse transport from string
pub fn parse_transport(s: &str) -> Transport {
    match s.to_lowercase().as_str() {
        "http" => Transport::Http,
        _ => Transport::Stdio,
    }
}

/// Parse log format from string
pub fn parse_log_format(s: &str) -> LogFormat {
    match s.to_lowercase().as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Text,
    }
}
