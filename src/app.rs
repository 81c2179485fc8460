// ABOUTME: Assembles the search server from a Config - one shared sequencer,
// ABOUTME: the Brave client, the internet_search tool, and the MCP server.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::SpoolerError;
use crate::mcp::McpServer;
use crate::search::BraveClient;
use crate::sequencer::Sequencer;
use crate::tool::Registry;
use crate::tools::InternetSearchTool;

/// Name the server announces during `initialize`.
pub const SERVER_NAME: &str = "spooler-search";

/// A ready-to-serve search server and the sequencer behind its tool.
pub struct SearchServer {
    pub server: Arc<McpServer>,
    pub sequencer: Sequencer,
}

impl SearchServer {
    /// Build the server from `config`. Must be called inside a Tokio runtime.
    pub async fn build(config: Config, version: &str) -> Result<Self, SpoolerError> {
        if config.brave_api_key.is_none() {
            warn!("BRAVE_API_KEY is not set; searches will fail until it is");
        }

        let sequencer = Sequencer::new(config.max_rate)?;
        let client = BraveClient::new(config.brave_api_key, config.http_timeout)?
            .with_endpoint(config.search_endpoint);

        let registry = Registry::new();
        registry
            .register(InternetSearchTool::new(sequencer.clone(), Arc::new(client)))
            .await;

        info!(
            tools = %registry.list().await.join(", "),
            min_interval = ?sequencer.min_interval(),
            "search server ready"
        );

        Ok(Self {
            server: Arc::new(McpServer::new(SERVER_NAME, version, registry)),
            sequencer,
        })
    }

    /// Serve on stdin and stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<(), SpoolerError> {
        Arc::clone(&self.server).serve_stdio().await?;
        info!(stats = ?self.sequencer.stats(), "stdin closed, shutting down");
        Ok(())
    }
}
