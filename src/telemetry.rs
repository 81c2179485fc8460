// ABOUTME: Tracing setup - installs an env-filtered fmt subscriber that
// ABOUTME: writes to stderr, since stdout carries the MCP protocol.

use tracing_subscriber::EnvFilter;

/// Install the default subscriber unless one is already set.
///
/// `RUST_LOG` wins over `default_filter` when present.
pub fn init_tracing(default_filter: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
