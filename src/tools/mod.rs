// MCP tools backed by the LeanIX MTM API

pub mod catalog;
pub mod query;

use serde_json::{json, Map, Value};
use std::sync::Arc;
use thiserror::Error;

use crate::error::ClientError;
use crate::http_client::MtmClient;
use catalog::{Fallback, Param, ParamKind, ToolSpec};
use query::{encode_segment, QueryParams};

/// Root of every MTM resource path
pub const SERVICE_PREFIX: &str = "/services/mtm/v1";

/// Errors produced while dispatching a tool call
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Tool dispatcher sharing one authenticated client
#[derive(Clone)]
pub struct ToolRegistry {
    client: Arc<MtmClient>,
}

impl ToolRegistry {
    pub fn new(client: Arc<MtmClient>) -> Self {
        Self { client }
    }

    /// Tool definitions in `tools/list` shape
    pub fn definitions(&self) -> Vec<Value> {
        catalog::TOOLS.iter().map(definition).collect()
    }

    /// Run a tool and return the upstream payload unchanged
    pub async fn call(&self, name: &str, args: &Value) -> Result<Value, ToolError> {
        let spec = catalog::find(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let path = build_path(spec, args)?;

        tracing::debug!(tool = name, path = %path, "Dispatching tool call");

        Ok(self.client.get(&path).await?)
    }
}

fn definition(spec: &ToolSpec) -> Value {
    let mut def = json!({
        "name": spec.name,
        "description": spec.description,
        "inputSchema": spec.input_schema(),
    });
    if let Some(output) = spec.output_schema {
        def["outputSchema"] = output();
    }
    def
}

/// Resolve the request path (with query string) for a tool call
pub fn build_path(spec: &ToolSpec, args: &Value) -> Result<String, ToolError> {
    let empty = Map::new();
    let args = match args {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => {
            return Err(ToolError::InvalidArguments(
                "arguments must be an object".to_string(),
            ))
        }
    };

    let mut path = spec.path.to_string();
    if let Some(id) = spec.id {
        let value = std::iter::once(id.name)
            .chain(id.aliases.iter().copied())
            .find_map(|key| string_arg(args, key).transpose())
            .transpose()?
            .ok_or_else(|| ToolError::InvalidArguments(format!("{} is required", id.name)))?;
        path = path.replace("{id}", &encode_segment(&value));
    }

    let mut query = QueryParams::new();
    for param in spec.params {
        let value = match param_value(param, args)? {
            Some(value) => Some(value),
            None => match param.fallback {
                Fallback::Sent(lit) => Some(lit.to_query_value()),
                _ => None,
            },
        };
        query.push_opt(param.name, value);
    }

    Ok(query.append_to(&format!("{}{}", SERVICE_PREFIX, path)))
}

/// Non-empty string argument; numbers are accepted and stringified
fn string_arg(args: &Map<String, Value>, key: &str) -> Result<Option<String>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(ToolError::InvalidArguments(format!(
            "{} must be a string",
            key
        ))),
    }
}

/// Query value for one parameter, `None` when the caller did not supply one
///
/// Zero counts as absent unless the parameter always goes on the wire.
fn param_value(param: &Param, args: &Map<String, Value>) -> Result<Option<String>, ToolError> {
    match param.kind {
        ParamKind::Str => string_arg(args, param.name),
        ParamKind::Int => {
            let always_sent = matches!(param.fallback, Fallback::Sent(_));
            let value = int_arg(args, param.name)?.filter(|&n| always_sent || n > 0);
            Ok(value.map(|n| n.to_string()))
        }
        ParamKind::Bool => bool_arg(args, param.name).map(|v| v.map(|b| b.to_string())),
    }
}

/// Non-negative integer argument
fn int_arg(args: &Map<String, Value>, key: &str) -> Result<Option<u64>, ToolError> {
    let invalid = || ToolError::InvalidArguments(format!("{} must be a non-negative integer", key));
    let value = match args.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => v,
            None => match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 => f as u64,
                _ => return Err(invalid()),
            },
        },
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };
    Ok(Some(value))
}

fn bool_arg(args: &Map<String, Value>, key: &str) -> Result<Option<bool>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(_) => Err(ToolError::InvalidArguments(format!(
            "{} must be a boolean",
            key
        ))),
    }
}
