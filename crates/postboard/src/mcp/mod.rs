mod cli;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};

const JSONRPC_VERSION: &str = "2.0";

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn new(id: Option<serde_json::Value>, outcome: Result<serde_json::Value, JsonRpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };

        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
            error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    fn with_code(code: i32, message: String) -> Self {
        Self {
            code,
            message,
            data: None,
        }
    }

    pub fn parse_error(message: String) -> Self {
        Self::with_code(-32700, message)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::with_code(-32601, format!("Method not found: {method}"))
    }

    pub fn invalid_params(message: String) -> Self {
        Self::with_code(-32602, message)
    }

    pub fn internal(message: String) -> Self {
        Self::with_code(-32603, message)
    }
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Methods this server understands
#[derive(Debug, PartialEq, Eq)]
enum Method<'a> {
    Initialize,
    ToolsList,
    ToolsCall,
    /// `notifications/*` messages, acknowledged by staying silent
    Notification(&'a str),
    Unknown(&'a str),
}

impl<'a> From<&'a str> for Method<'a> {
    fn from(method: &'a str) -> Self {
        match method {
            "initialize" => Method::Initialize,
            "tools/list" => Method::ToolsList,
            "tools/call" => Method::ToolsCall,
            other if other.starts_with("notifications/") => Method::Notification(other),
            other => Method::Unknown(other),
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(global).await,
    }
}

/// Handle one JSON-RPC message
///
/// Returns `None` for notifications, which get no response on the wire.
pub async fn handle_request(request_str: &str, global: &crate::Global) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(request_str) {
        Ok(req) => req,
        Err(e) => {
            log::warn!("unparseable request: {e}");
            return Some(JsonRpcResponse::new(
                None,
                Err(JsonRpcError::parse_error(format!("Parse error: {e}"))),
            ));
        }
    };

    let method = Method::from(request.method.as_str());
    log::debug!("{:?} (id {:?})", method, request.id);

    let outcome = match method {
        Method::Initialize => tools::handle_initialize(),
        Method::ToolsList => tools::handle_tools_list(),
        Method::ToolsCall => tools::handle_tools_call(request.params, global).await,
        Method::Notification(_) if request.id.is_none() => return None,
        Method::Notification(name) | Method::Unknown(name) => {
            Err(JsonRpcError::method_not_found(name))
        }
    };

    if let Err(error) = &outcome {
        log::debug!("{} failed with {}: {}", request.method, error.code, error.message);
    }

    Some(JsonRpcResponse::new(request.id, outcome))
}
