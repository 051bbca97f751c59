use serde::Serialize;
use utoipa::ToSchema;

use super::ImageHost;
use crate::models::{SearchResult, ThumbnailSource, VariantProfile, THUMBNAIL_SIZE};

pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Check connection.";

/// One clickable result tile.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResultCard {
    pub title: String,
    /// `None` renders as a placeholder tile
    pub thumbnail_url: Option<String>,
    /// Path fragment passed back when the card is selected
    pub backdrop_path: String,
    /// Full-size backdrop shown when the card is selected
    pub backdrop_url: String,
}

/// Content of the results area.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsView {
    Cards { cards: Vec<ResultCard> },
    Message { text: String },
}

impl ResultsView {
    pub fn failed() -> Self {
        ResultsView::Message {
            text: SEARCH_FAILED_MESSAGE.to_string(),
        }
    }

    /// Filter to results with a backdrop, keep the first `result_cap`, and
    /// build one card per result. No survivors yields the no-results message.
    pub fn from_results(
        results: &[SearchResult],
        profile: &VariantProfile,
        host: &ImageHost,
    ) -> Self {
        let cards: Vec<ResultCard> = results
            .iter()
            .filter_map(|result| result.backdrop().map(|path| (result, path)))
            .take(profile.result_cap)
            .map(|(result, backdrop_path)| {
                let thumbnail_path = match profile.thumbnail {
                    ThumbnailSource::Poster => result.poster(),
                    ThumbnailSource::Backdrop => Some(backdrop_path),
                };
                ResultCard {
                    title: result.title.clone(),
                    thumbnail_url: thumbnail_path.map(|p| host.url(THUMBNAIL_SIZE, p)),
                    backdrop_path: backdrop_path.to_string(),
                    backdrop_url: host.backdrop_url(backdrop_path),
                }
            })
            .collect();

        if cards.is_empty() {
            ResultsView::Message {
                text: NO_RESULTS_MESSAGE.to_string(),
            }
        } else {
            ResultsView::Cards { cards }
        }
    }

    pub fn cards(&self) -> &[ResultCard] {
        match self {
            ResultsView::Cards { cards } => cards,
            ResultsView::Message { .. } => &[],
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ResultsView::Message { text } => Some(text),
            ResultsView::Cards { .. } => None,
        }
    }
}
