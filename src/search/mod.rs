// ABOUTME: Search module - Brave Web Search client, response types, and
// ABOUTME: plain-text formatting of results.

mod client;
mod format;
mod types;

pub use client::{BraveClient, DEFAULT_ENDPOINT};
pub use format::format_results;
pub use types::*;

#[cfg(test)]
mod client_test;
