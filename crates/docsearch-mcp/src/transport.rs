//! Stdio transport — talks line-delimited JSON-RPC to a child process.

use std::collections::HashMap;
use std::process::Stdio;

use docsearch_core::error::{DocSearchError, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use crate::types::{JsonRpcRequest, JsonRpcResponse};

/// A spawned MCP server process and its stdio pipes.
pub struct StdioTransport {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl StdioTransport {
    /// Spawn `command` with `args` and extra `env` vars. Its stderr is inherited.
    pub async fn spawn(
        command: &str,
        args: &[String],
        env: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut child = Command::new(command)
            .args(args)
            .envs(env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DocSearchError::Mcp(format!("Failed to spawn '{command}': {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| DocSearchError::Mcp("child stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DocSearchError::Mcp("child stdout unavailable".into()))?;

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
        })
    }

    async fn send(&mut self, req: &JsonRpcRequest) -> Result<()> {
        let mut line = serde_json::to_string(req)?;
        line.push('\n');
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Send a request and wait for the response carrying the same id.
    ///
    /// Lines that are not responses to this request are skipped.
    pub async fn request(&mut self, req: &JsonRpcRequest) -> Result<JsonRpcResponse> {
        self.send(req).await?;

        loop {
            let Some(line) = self.stdout.next_line().await? else {
                return Err(DocSearchError::Mcp(format!(
                    "server closed the connection while waiting for '{}'",
                    req.method
                )));
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<JsonRpcResponse>(&line) {
                Ok(resp) if resp.id == req.id => return Ok(resp),
                Ok(_) => tracing::debug!("Skipping unrelated MCP message"),
                Err(_) => tracing::debug!("Skipping non-JSON-RPC line: {}", line),
            }
        }
    }

    /// Send a notification; no response is expected.
    pub async fn notify(&mut self, req: &JsonRpcRequest) -> Result<()> {
        self.send(req).await
    }

    /// Whether the child process is still running.
    pub fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Close stdin and wait for the child to exit, killing it if needed.
    pub async fn shutdown(&mut self) {
        let _ = self.stdin.shutdown().await;
        let exited = tokio::time::timeout(std::time::Duration::from_secs(2), self.child.wait()).await;
        if exited.is_err() {
            let _ = self.child.kill().await;
        }
    }
}
