// ABOUTME: MCP module - Model Context Protocol server over stdio.
// ABOUTME: JSON-RPC message types plus the request dispatcher.

mod server;
mod types;

pub use server::McpServer;
pub use types::*;

#[cfg(test)]
mod types_test;
