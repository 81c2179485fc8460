// ABOUTME: BraveClient - issues Brave Web Search API requests over HTTPS.
// ABOUTME: Maps transport, status, and decoding failures to SearchError.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::SearchResponse;
use crate::error::SearchError;

/// Brave Web Search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

const TOKEN_HEADER: &str = "X-Subscription-Token";

/// Client for the Brave Web Search API.
///
/// A missing API key is not an error at construction; each `search` call
/// checks for it, so a server can start and advertise its tools without one.
pub struct BraveClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for BraveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BraveClient")
            .field("endpoint", &self.endpoint)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl BraveClient {
    /// Create a client with the default endpoint and the given request timeout.
    pub fn new(api_key: Option<SecretString>, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("spooler/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, api_key))
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: reqwest::Client, api_key: Option<SecretString>) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
        }
    }

    /// Override the search endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a web search for `query`, asking for `count` results.
    pub async fn search(&self, query: &str, count: u8) -> Result<SearchResponse, SearchError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| SearchError::Configuration("BRAVE_API_KEY is not set".into()))?;

        let url = format!(
            "{}?q={}&count={}",
            self.endpoint,
            urlencoding::encode(query),
            count
        );
        debug!(count, "sending search request");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(TOKEN_HEADER, api_key.expose_secret())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
