//! MCP Client — connects to an MCP server, discovers tools, and calls them.

use docsearch_core::error::{DocSearchError, Result};

use crate::transport::StdioTransport;
use crate::types::*;

/// MCP Client — manages connection to a single MCP server.
pub struct McpClient {
    pub name: String,
    config: McpServerConfig,
    transport: Option<StdioTransport>,
    tools: Vec<McpToolInfo>,
    next_id: u64,
}

impl McpClient {
    /// Create a new MCP client from config (not yet connected).
    pub fn new(config: McpServerConfig) -> Self {
        Self {
            name: config.name.clone(),
            config,
            transport: None,
            tools: vec![],
            next_id: 1,
        }
    }

    /// Connect to the MCP server — spawn process + initialize + discover tools.
    pub async fn connect(&mut self) -> Result<()> {
        if !self.config.enabled {
            return Err(DocSearchError::Mcp(format!(
                "MCP server '{}' is disabled",
                self.name
            )));
        }

        tracing::info!("🔗 Connecting to MCP server '{}'...", self.name);

        let transport =
            StdioTransport::spawn(&self.config.command, &self.config.args, &self.config.env)
                .await?;
        self.transport = Some(transport);

        self.initialize().await?;
        self.discover_tools().await?;

        tracing::info!(
            "✅ MCP server '{}' connected — {} tools available",
            self.name,
            self.tools.len()
        );

        Ok(())
    }

    fn transport(&mut self) -> Result<&mut StdioTransport> {
        self.transport
            .as_mut()
            .ok_or_else(|| DocSearchError::Mcp("MCP server not connected".into()))
    }

    /// Initialize the MCP session (handshake).
    async fn initialize(&mut self) -> Result<()> {
        let id = self.next_id();
        let req = JsonRpcRequest::new(
            id,
            "initialize",
            Some(serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {
                    "name": "docsearch-probe",
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
        );

        let transport = self.transport()?;
        let res = transport.request(&req).await?;
        if let Some(err) = res.error {
            return Err(DocSearchError::Mcp(format!(
                "initialize error: {} (code {})",
                err.message, err.code
            )));
        }

        let notify = JsonRpcRequest::notification("notifications/initialized", None);
        transport.notify(&notify).await
    }

    /// Discover tools from the MCP server.
    async fn discover_tools(&mut self) -> Result<()> {
        let id = self.next_id();
        let server_name = self.name.clone();
        let req = JsonRpcRequest::new(id, "tools/list", None);
        let res = self.transport()?.request(&req).await?;

        if let Some(err) = res.error {
            return Err(DocSearchError::Mcp(format!(
                "tools/list error: {} (code {})",
                err.message, err.code
            )));
        }

        if let Some(result) = res.result {
            let tools_result: ToolsListResult = serde_json::from_value(result)?;

            self.tools = tools_result
                .tools
                .into_iter()
                .map(|t| McpToolInfo {
                    name: t.name,
                    description: t.description.unwrap_or_default(),
                    input_schema: t.input_schema.unwrap_or(serde_json::json!({
                        "type": "object",
                        "properties": {}
                    })),
                    server_name: server_name.clone(),
                })
                .collect();
        }

        Ok(())
    }

    /// Call a tool on the MCP server and return its text output.
    pub async fn call_tool(
        &mut self,
        tool_name: &str,
        arguments: serde_json::Value,
    ) -> Result<String> {
        let id = self.next_id();
        let req = JsonRpcRequest::new(
            id,
            "tools/call",
            Some(serde_json::json!({
                "name": tool_name,
                "arguments": arguments
            })),
        );

        let res = self.transport()?.request(&req).await?;

        if let Some(err) = res.error {
            return Err(DocSearchError::Mcp(format!(
                "Tool '{}' error: {} (code {})",
                tool_name, err.message, err.code
            )));
        }

        let Some(result) = res.result else {
            return Ok(String::new());
        };
        let call_result: ToolCallResult = serde_json::from_value(result)?;

        let text = call_result
            .content
            .iter()
            .filter(|c| c.content_type == "text")
            .filter_map(|c| c.text.clone())
            .collect::<Vec<_>>()
            .join("\n");

        if call_result.is_error {
            return Err(DocSearchError::Mcp(format!(
                "Tool '{}' returned error: {}",
                tool_name, text
            )));
        }

        Ok(text)
    }

    /// Get discovered tools.
    pub fn tools(&self) -> &[McpToolInfo] {
        &self.tools
    }

    /// Check if connected and alive.
    pub fn is_connected(&mut self) -> bool {
        self.transport.as_mut().is_some_and(|t| t.is_alive())
    }

    /// Disconnect from the MCP server.
    pub async fn disconnect(&mut self) {
        if let Some(transport) = self.transport.as_mut() {
            transport.shutdown().await;
        }
        self.transport = None;
        self.tools.clear();
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
