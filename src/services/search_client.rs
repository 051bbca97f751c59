use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::time::Duration;

use crate::error::SearchError;
use crate::models::{parse_results, SearchResult};

/// Characters left unescaped in a query component: alphanumerics and
/// `- _ . ! ~ * ' ( )`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for use inside a query string.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// A trimmed, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// `None` if the input is empty after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Client for the movie database search endpoint.
#[derive(Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// `{base}/search/movie?api_key={key}&query={query}`
    pub fn request_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/search/movie?api_key={}&query={}",
            self.base_url,
            encode_component(&self.api_key),
            encode_component(query.as_str())
        )
    }

    /// Run a search and return the parsed results, uncapped and unfiltered.
    ///
    /// A non-success status is logged but its body is still parsed.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError> {
        tracing::debug!(query = %query.as_str(), "Searching movies");

        let response = self
            .client
            .get(self.request_url(query))
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, query = %query.as_str(), "Search endpoint returned an error status");
        }

        let body: serde_json::Value = response.json().await.map_err(SearchError::Body)?;
        let results = parse_results(&body);

        tracing::debug!(count = results.len(), "Search completed");
        Ok(results)
    }
}
