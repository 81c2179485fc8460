// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use spooler::prelude::*;` to get started quickly.

pub use crate::app::SearchServer;
pub use crate::config::Config;
pub use crate::error::{
    ConfigError, McpError, SearchError, SequencerError, SpoolerError, ToolError, WorkError,
};
pub use crate::mcp::{McpRequest, McpResponse, McpRpcError, McpServer, McpToolInfo};
pub use crate::search::{BraveClient, SearchResponse, format_results};
pub use crate::sequencer::{OutcomeHandle, Sequencer, SequencerStats};
pub use crate::telemetry::init_tracing;
pub use crate::tool::{Registry, Tool, ToolResult};
pub use crate::tools::InternetSearchTool;
