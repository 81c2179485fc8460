// ABOUTME: Defines the Tool trait - a named capability with a JSON Schema
// ABOUTME: for its input and an async execute method.

use async_trait::async_trait;

use super::ToolResult;
use crate::error::ToolError;

/// A tool that can be invoked through the MCP server.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for the client.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given parameters.
    ///
    /// Failures the caller should see as tool output belong in
    /// `ToolResult::error`; `Err` is for calls that could not be made.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, ToolError>;
}
