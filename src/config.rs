// ABOUTME: Typed configuration from environment variables, loaded once at
// ABOUTME: startup. The API key is kept in a SecretString.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::search::DEFAULT_ENDPOINT;

/// Default searches per second.
pub const DEFAULT_MAX_RATE: f64 = 1.0;
/// Default HTTP timeout for one search request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration for the search server.
#[derive(Debug)]
pub struct Config {
    /// Brave API key. Searches fail with a configuration error without it.
    pub brave_api_key: Option<SecretString>,
    /// Search endpoint URL.
    pub search_endpoint: String,
    /// Maximum searches started per second.
    pub max_rate: f64,
    /// Timeout for one search request.
    pub http_timeout: Duration,
    /// Tracing filter directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brave_api_key: None,
            search_endpoint: DEFAULT_ENDPOINT.to_string(),
            max_rate: DEFAULT_MAX_RATE,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load a `.env` file if one exists, then read the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let max_rate = match var("SPOOLER_MAX_RATE") {
            Some(raw) => parse_rate(&raw)?,
            None => defaults.max_rate,
        };

        let http_timeout = match var("SPOOLER_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| invalid("SPOOLER_HTTP_TIMEOUT_SECS", &raw, e.to_string()))?;
                if secs == 0 {
                    return Err(invalid("SPOOLER_HTTP_TIMEOUT_SECS", &raw, "must be at least 1"));
                }
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        Ok(Self {
            brave_api_key: var("BRAVE_API_KEY").map(SecretString::from),
            search_endpoint: var("BRAVE_SEARCH_ENDPOINT").unwrap_or(defaults.search_endpoint),
            max_rate,
            http_timeout,
            log_filter: var("RUST_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_rate(raw: &str) -> Result<f64, ConfigError> {
    let rate = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid("SPOOLER_MAX_RATE", raw, e.to_string()))?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(invalid("SPOOLER_MAX_RATE", raw, "must be a positive number"));
    }
    if Duration::try_from_secs_f64(1.0 / rate).is_err() {
        return Err(invalid("SPOOLER_MAX_RATE", raw, "too small to space starts"));
    }
    Ok(rate)
}

fn invalid(name: &str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}
