// ABOUTME: Brave web search MCP server over stdio.
// ABOUTME: Loads config, installs tracing, then builds and serves the search server.

use anyhow::{Context, Result};

use spooler::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_tracing(&config.log_filter);

    let server = SearchServer::build(config, env!("CARGO_PKG_VERSION")).await?;
    server.serve_stdio().await?;
    Ok(())
}
