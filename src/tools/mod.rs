// ABOUTME: Built-in tools served by the MCP server.
// ABOUTME: Currently the rate-limited internet search.

mod internet_search;

pub use internet_search::{DEFAULT_COUNT, InternetSearchTool, MAX_COUNT, clamp_count};
