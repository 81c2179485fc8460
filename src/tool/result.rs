// ABOUTME: Defines the ToolResult type - the text a tool produced, whether it
// ABOUTME: is an error report, and metadata; converts into an MCP call result.

use std::collections::HashMap;

use serde::Serialize;

use crate::mcp::{McpContentBlock, McpToolResult};

/// Result of a tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolResult {
    /// The output content.
    pub content: String,

    /// Whether this result reports a failure to the caller.
    pub is_error: bool,

    /// Optional metadata about the execution. Not sent over MCP.
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ToolResult {
    /// Create a successful text result.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Create an error result.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: true,
            ..Self::default()
        }
    }

    /// Add metadata to the result. Values that fail to serialize are skipped.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), v);
        }
        self
    }
}

impl From<ToolResult> for McpToolResult {
    fn from(result: ToolResult) -> Self {
        Self {
            content: vec![McpContentBlock::Text {
                text: result.content,
            }],
            is_error: result.is_error,
        }
    }
}
