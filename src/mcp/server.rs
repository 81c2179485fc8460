// ABOUTME: MCP server - answers JSON-RPC over newline-delimited stdio, serving
// ABOUTME: the tools in a Registry. Each request runs on its own task.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{
    McpImplementation, McpInitializeParams, McpInitializeResult, McpRequest, McpResponse,
    McpRpcError, McpServerCapabilities, McpToolCallParams, McpToolResult, McpToolsListResult,
    PROTOCOL_VERSION,
};
use crate::error::{McpError, ToolError};
use crate::tool::Registry;

/// Responses waiting for the writer task.
const RESPONSE_BUFFER: usize = 64;

/// Serves a tool registry over the Model Context Protocol.
pub struct McpServer {
    info: McpImplementation,
    registry: Registry,
}

impl McpServer {
    /// Create a server announcing itself as `name`/`version`.
    pub fn new(name: impl Into<String>, version: impl Into<String>, registry: Registry) -> Self {
        Self {
            info: McpImplementation {
                name: name.into(),
                version: version.into(),
            },
            registry,
        }
    }

    /// The registry this server dispatches to.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Serve on the process's stdin and stdout until stdin closes.
    pub async fn serve_stdio(self: Arc<Self>) -> Result<(), McpError> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, writing to `writer`.
    ///
    /// Requests are handled concurrently; responses are written one per
    /// line in completion order. Returns after `reader` reaches EOF and
    /// every in-flight request has been answered.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> Result<(), McpError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<McpResponse>(RESPONSE_BUFFER);

        let writer_task = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(response) = rx.recv().await {
                let mut line = serde_json::to_vec(&response)?;
                line.push(b'\n');
                writer.write_all(&line).await?;
                writer.flush().await?;
            }
            Ok::<_, McpError>(())
        });

        info!(server = %self.info.name, "MCP server listening");
        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let server = Arc::clone(&self);
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_line(&line).await {
                    if tx.send(response).await.is_err() {
                        warn!("response dropped, writer has stopped");
                    }
                }
            });
        }
        drop(tx);
        debug!("input closed, waiting for in-flight requests");

        writer_task
            .await
            .map_err(|e| McpError::Protocol(format!("writer task failed: {}", e)))?
    }

    /// Handle one raw input line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparsable message");
                return Some(McpResponse::failure(
                    serde_json::Value::Null,
                    McpRpcError::parse_error(format!("Parse error: {}", e)),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
        match serde_json::from_value::<McpRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(McpResponse::failure(
                id,
                McpRpcError::invalid_request(format!("Invalid request: {}", e)),
            )),
        }
    }

    /// Handle a parsed request. Returns `None` for notifications.
    pub async fn handle(&self, request: McpRequest) -> Option<McpResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification received");
            return None;
        };

        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.list_tools().await,
            "tools/call" => self.call_tool(request.params).await,
            other => Err(McpRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => McpResponse::success(id, result),
            Err(error) => McpResponse::failure(id, error),
        })
    }

    fn initialize(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, McpRpcError> {
        let params = params.and_then(|p| serde_json::from_value::<McpInitializeParams>(p).ok());
        if let Some(params) = params {
            let client = params
                .client_info
                .map(|c| format!("{} {}", c.name, c.version))
                .unwrap_or_else(|| "unknown".to_string());
            info!(%client, protocol = %params.protocol_version, "client initializing");
        }

        to_result(&McpInitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: McpServerCapabilities {
                tools: Some(serde_json::json!({})),
            },
            server_info: self.info.clone(),
        })
    }

    async fn list_tools(&self) -> Result<serde_json::Value, McpRpcError> {
        to_result(&McpToolsListResult {
            tools: self.registry.to_infos().await,
        })
    }

    async fn call_tool(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, McpRpcError> {
        let params: McpToolCallParams = params
            .ok_or_else(|| McpRpcError::invalid_params("Missing params"))
            .and_then(|p| {
                serde_json::from_value(p)
                    .map_err(|e| McpRpcError::invalid_params(format!("Invalid params: {}", e)))
            })?;

        let tool = self.registry.get(&params.name).await.ok_or_else(|| {
            McpRpcError::invalid_params(ToolError::NotFound(params.name.clone()).to_string())
        })?;

        debug!(tool = %params.name, "tool call");
        let arguments = params.arguments.unwrap_or_else(|| serde_json::json!({}));

        match tool.execute(arguments).await {
            Ok(result) => to_result(&McpToolResult::from(result)),
            Err(e @ ToolError::InvalidParams(_)) => {
                Err(McpRpcError::invalid_params(e.to_string()))
            }
            Err(e) => {
                warn!(tool = %params.name, error = %e, "tool call failed");
                Err(McpRpcError::internal(e.to_string()))
            }
        }
    }
}

fn to_result<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, McpRpcError> {
    serde_json::to_value(value).map_err(|e| McpRpcError::internal(e.to_string()))
}
