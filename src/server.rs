//! JSON-RPC 2.0 tool server over newline-delimited stdio
//!
//! stdout carries protocol messages only; all logging goes to stderr.
//!
//! Supported methods: `initialize`, `notifications/initialized`, `ping`,
//! `tools/list`, `tools/call`. Tool failures are returned as normal results
//! with `isError: true` so clients can show them to the user.

use crate::tools::{self, AlphaService};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "daily-alpha";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

impl RpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

fn text_result(text: String, is_error: bool) -> Value {
    json!({
        "content": [{"type": "text", "text": text}],
        "isError": is_error,
    })
}

/// Handle one inbound line, returning the serialized reply if one is due
///
/// Notifications (no `id`) never get a reply.
pub async fn handle_message(service: &AlphaService, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let response = match serde_json::from_str::<Value>(line) {
        Err(e) => {
            log::warn!("⚠️  Unparsable message: {}", e);
            Some(RpcResponse::failure(Value::Null, PARSE_ERROR, format!("Parse error: {}", e)))
        }
        Ok(value) => {
            let fallback_id = value.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value::<RpcRequest>(value) {
                Err(e) => Some(RpcResponse::failure(
                    fallback_id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                )),
                Ok(request) => dispatch(service, request).await,
            }
        }
    };

    let response = response?;
    match serde_json::to_string(&response) {
        Ok(text) => Some(text),
        Err(e) => {
            log::error!("❌ Failed to serialize response: {}", e);
            None
        }
    }
}

async fn dispatch(service: &AlphaService, request: RpcRequest) -> Option<RpcResponse> {
    let Some(id) = request.id else {
        log::debug!("Notification: {}", request.method);
        return None;
    };

    let response = match request.method.as_str() {
        "initialize" => RpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {}},
                "serverInfo": {"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")},
            }),
        ),
        "ping" => RpcResponse::success(id, json!({})),
        "tools/list" => RpcResponse::success(id, json!({"tools": tools::tool_definitions()})),
        "tools/call" => {
            let params = request
                .params
                .ok_or_else(|| "missing params".to_string())
                .and_then(|p| serde_json::from_value::<CallParams>(p).map_err(|e| e.to_string()));

            match params {
                Err(e) => RpcResponse::failure(id, INVALID_PARAMS, format!("Invalid params: {}", e)),
                Ok(call) => {
                    let result = match tools::call_tool(service, &call.name, call.arguments.as_ref()).await {
                        Ok(text) => text_result(text, false),
                        Err(e) => {
                            log::warn!("⚠️  {} failed: {}", call.name, e);
                            text_result(format!("Error executing {}: {}", call.name, e), true)
                        }
                    };
                    RpcResponse::success(id, result)
                }
            }
        }
        other => RpcResponse::failure(id, METHOD_NOT_FOUND, format!("Method not found: {}", other)),
    };

    Some(response)
}

/// Serve requests from stdin until EOF or Ctrl-C
pub async fn run_stdio(service: &AlphaService) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    log::info!("✅ {} ready on stdio ({} tools)", SERVER_NAME, tools::tool_definitions().len());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if let Some(reply) = handle_message(service, &line).await {
                            stdout.write_all(reply.as_bytes()).await?;
                            stdout.write_all(b"\n").await?;
                            stdout.flush().await?;
                        }
                    }
                    None => {
                        log::info!("📭 stdin closed, shutting down");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("🛑 Interrupted, shutting down");
                break;
            }
        }
    }

    Ok(())
}
