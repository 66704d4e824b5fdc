//! MCP server — answers JSON-RPC requests on stdio with the document tools.
//!
//! One JSON message per line in each direction. Notifications get no reply.
//! Logs must not go to stdout, which carries the protocol.

use docsearch_core::error::DocSearchError;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::tools::DocumentTools;
use crate::types::*;

pub const SERVER_NAME: &str = "document-search-server";

/// MCP server over the document tools.
pub struct McpServer {
    tools: DocumentTools,
}

impl McpServer {
    pub fn new(tools: DocumentTools) -> Self {
        Self { tools }
    }

    /// Handle one request. Returns `None` for notifications.
    pub fn handle(&self, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if req.is_notification() {
            tracing::debug!("Notification: {}", req.method);
            return None;
        }

        let id = req.id.clone();
        let response = match req.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                let result = ToolsListResult {
                    tools: self.tools.definitions(),
                };
                match serde_json::to_value(result) {
                    Ok(v) => JsonRpcResponse::success(id, v),
                    Err(e) => JsonRpcResponse::failure(id, INTERNAL_ERROR, e.to_string()),
                }
            }
            "tools/call" => self.call_tool(id, req.params),
            other => {
                tracing::warn!("Unknown MCP method: {}", other);
                JsonRpcResponse::failure(id, METHOD_NOT_FOUND, format!("Method not found: {other}"))
            }
        };
        Some(response)
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn call_tool(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = params.unwrap_or(Value::Null);
        let Some(name) = params["name"].as_str() else {
            return JsonRpcResponse::failure(id, INVALID_PARAMS, "Missing tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        match self.tools.call(name, arguments) {
            Ok(text) => {
                let result = ToolCallResult {
                    content: vec![ContentBlock::text(text)],
                    is_error: false,
                };
                match serde_json::to_value(result) {
                    Ok(v) => JsonRpcResponse::success(id, v),
                    Err(e) => JsonRpcResponse::failure(id, INTERNAL_ERROR, e.to_string()),
                }
            }
            Err(e @ (DocSearchError::UnknownTool(_) | DocSearchError::Validation(_))) => {
                tracing::warn!("Tool '{}' rejected: {}", name, e);
                JsonRpcResponse::failure(id, INVALID_PARAMS, e.to_string())
            }
            Err(e) => {
                tracing::error!("Tool '{}' failed: {}", name, e);
                JsonRpcResponse::failure(id, INTERNAL_ERROR, e.to_string())
            }
        }
    }

    /// Handle one raw line of input.
    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };
        let id = value.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(req) => self.handle(req),
            Err(e) => Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {e}"),
            )),
        }
    }

    /// Serve requests from `reader` until EOF, writing replies to `writer`.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                return Ok(());
            }
            // A line that is not UTF-8 is rejected on its own; the session goes on.
            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line),
                Err(e) => {
                    tracing::warn!("Rejecting non-UTF-8 input line: {}", e);
                    Some(JsonRpcResponse::failure(
                        None,
                        PARSE_ERROR,
                        format!("Parse error: {e}"),
                    ))
                }
            };
            if let Some(response) = response {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }
    }

    /// Serve on the process's stdin/stdout.
    pub async fn serve_stdio(&self) -> std::io::Result<()> {
        tracing::info!("📚 Document Search MCP Server running on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}
