// ABOUTME: Root module for spooler - rate-limited sequencing of async work,
// ABOUTME: and a Brave web search MCP server built on it.

pub mod app;
pub mod config;
pub mod error;
pub mod mcp;
pub mod prelude;
pub mod search;
pub mod sequencer;
pub mod telemetry;
pub mod tool;
pub mod tools;

pub use app::SearchServer;
pub use error::SpoolerError;
