// ABOUTME: Defines the subset of the Brave Web Search response we consume:
// ABOUTME: query echo, web results, and news results.

use serde::{Deserialize, Serialize};

/// Top-level Brave search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<QueryInfo>,
    #[serde(default)]
    pub web: Option<WebResults>,
    #[serde(default)]
    pub news: Option<NewsResults>,
}

impl SearchResponse {
    /// Web results, or an empty slice when the section is absent.
    pub fn web_results(&self) -> &[WebResult] {
        self.web.as_ref().map(|w| w.results.as_slice()).unwrap_or_default()
    }

    /// News results, or an empty slice when the section is absent.
    pub fn news_results(&self) -> &[NewsResult] {
        self.news.as_ref().map(|n| n.results.as_slice()).unwrap_or_default()
    }
}

/// The query as Brave understood it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryInfo {
    #[serde(default)]
    pub original: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebResults {
    #[serde(default)]
    pub results: Vec<WebResult>,
}

/// A single web search hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsResults {
    #[serde(default)]
    pub results: Vec<NewsResult>,
}

/// A single news hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}
