// ABOUTME: InternetSearchTool - web search through the Brave API, serialized
// ABOUTME: and rate-limited by a shared Sequencer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ToolError;
use crate::search::{BraveClient, format_results};
use crate::sequencer::Sequencer;
use crate::tool::{Tool, ToolResult};

/// Result count used when the caller gives none (or zero).
pub const DEFAULT_COUNT: u8 = 10;
/// Largest result count the API is asked for.
pub const MAX_COUNT: u8 = 20;

/// Tool for searching the web.
///
/// Every search is submitted to the sequencer, so concurrent calls queue
/// up and reach the API one at a time at the sequencer's rate.
pub struct InternetSearchTool {
    sequencer: Sequencer,
    client: Arc<BraveClient>,
}

impl InternetSearchTool {
    /// Create a search tool sharing `sequencer` with any other users of it.
    pub fn new(sequencer: Sequencer, client: Arc<BraveClient>) -> Self {
        Self { sequencer, client }
    }
}

/// Turn a raw `count` argument into a result count in `1..=MAX_COUNT`.
///
/// Absent, null, zero, or unreadable values mean `DEFAULT_COUNT`.
/// Fractions are truncated; numeric strings are accepted.
pub fn clamp_count(raw: Option<&serde_json::Value>) -> u8 {
    let requested = match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match requested {
        Some(n) if n.is_finite() && n != 0.0 => n.trunc().clamp(1.0, f64::from(MAX_COUNT)) as u8,
        _ => DEFAULT_COUNT,
    }
}

#[async_trait]
impl Tool for InternetSearchTool {
    fn name(&self) -> &str {
        "internet_search"
    }

    fn description(&self) -> &str {
        "Performs a web search using the Brave Search API. Returns relevant websites, snippets, and URLs. Optionally displays news results."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "count": {
                    "type": "number",
                    "description": "Number of results to return (Default: 10, Maximum: 20)",
                    "default": DEFAULT_COUNT
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = match params.get("query") {
            Some(serde_json::Value::String(q)) if !q.is_empty() => q.clone(),
            _ => {
                return Err(ToolError::InvalidParams(
                    "\"query\" is required and must be a non-empty string".into(),
                ));
            }
        };
        let count = clamp_count(params.get("count"));

        let client = self.client.clone();
        let handle = self
            .sequencer
            .submit(move || async move { client.search(&query, count).await });
        debug!(id = handle.id(), count, "search queued");

        let result = match handle.await {
            Ok(response) => ToolResult::text(format_results(&response)),
            Err(e) => ToolResult::error(format!("Search failed: {}", e)),
        };
        Ok(result.with_metadata("count", count))
    }
}
