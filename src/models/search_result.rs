use serde::{Deserialize, Serialize};

/// One movie record from the search endpoint.
///
/// Path fields are fragments such as `/abc.jpg`, not full URLs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl SearchResult {
    /// Backdrop path, if present and non-empty.
    pub fn backdrop(&self) -> Option<&str> {
        self.backdrop_path.as_deref().filter(|p| !p.is_empty())
    }

    /// Poster path, if present and non-empty.
    pub fn poster(&self) -> Option<&str> {
        self.poster_path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Extract result records from a search response body.
///
/// A missing or non-array `results` field yields no results; individual
/// entries that do not parse are skipped.
pub fn parse_results(body: &serde_json::Value) -> Vec<SearchResult> {
    let Some(entries) = body.get("results").and_then(|r| r.as_array()) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match SearchResult::deserialize(entry) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::debug!(%e, "Skipping malformed search result");
                None
            }
        })
        .collect()
}
