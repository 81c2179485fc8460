// ABOUTME: Defines all error types for the spooler library using thiserror.
// ABOUTME: Each submodule has its own error enum, unified under SpoolerError.

pub use crate::sequencer::{SequencerError, WorkError};

/// Top-level error type for the spooler library.
#[derive(Debug, thiserror::Error)]
pub enum SpoolerError {
    #[error("Sequencer error: {0}")]
    Sequencer(#[from] SequencerError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("MCP error: {0}")]
    Mcp(#[from] McpError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from the Brave search client.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors from tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}

/// Errors from serving the MCP protocol.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}
