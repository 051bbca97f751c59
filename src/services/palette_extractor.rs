//! Fetch, decode and quantize an image into a [`Palette`].

use async_trait::async_trait;
use image::GenericImageView;
use std::sync::Arc;
use std::time::Duration;
use swatch::{Palette, PaletteBuilder};

use super::LocalResourceStore;
use crate::error::ExtractError;
use crate::models::PaletteConfig;

/// Fetches remote image bytes.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ExtractError>;
}

/// [`ImageFetcher`] over HTTP.
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ExtractError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExtractError::Fetch(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Where the pixels for an extraction come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote URL, already rewritten to the sampling rendition
    Remote(String),
    /// A local resource by id
    Local(u64),
}

pub struct PaletteExtractor {
    fetcher: Arc<dyn ImageFetcher>,
    store: Arc<LocalResourceStore>,
    builder: PaletteBuilder,
    max_dimension: u32,
}

impl PaletteExtractor {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        store: Arc<LocalResourceStore>,
        config: &PaletteConfig,
    ) -> Self {
        Self {
            fetcher,
            store,
            builder: PaletteBuilder::new()
                .quality(config.quality)
                .color_count(config.color_count),
            max_dimension: config.max_dimension.max(1),
        }
    }

    /// Load the source and extract its palette. Decoding and quantizing run on
    /// the blocking pool.
    pub async fn extract(&self, source: &ImageSource) -> Result<Palette, ExtractError> {
        let bytes: Arc<[u8]> = match source {
            ImageSource::Remote(url) => {
                tracing::debug!(%url, "Fetching image for palette");
                self.fetcher.fetch(url).await?.into()
            }
            ImageSource::Local(id) => {
                self.store
                    .get(*id)
                    .ok_or(ExtractError::ResourceReleased(*id))?
                    .bytes
                    .clone()
            }
        };

        let builder = self.builder.clone();
        let max_dimension = self.max_dimension;
        tokio::task::spawn_blocking(move || palette_from_bytes(&bytes, &builder, max_dimension))
            .await
            .map_err(|e| ExtractError::Task(e.to_string()))?
    }
}

/// Decode an encoded image, shrink it to fit `max_dimension`, and run the
/// palette builder over its pixels.
pub fn palette_from_bytes(
    bytes: &[u8],
    builder: &PaletteBuilder,
    max_dimension: u32,
) -> Result<Palette, ExtractError> {
    let mut img = image::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    if width > max_dimension || height > max_dimension {
        img = img.thumbnail(max_dimension, max_dimension);
    }

    let rgba = img.to_rgba8();
    let palette = builder.extract_rgba(rgba.as_raw(), rgba.width(), rgba.height())?;

    tracing::debug!(
        width = rgba.width(),
        height = rgba.height(),
        swatches = palette.len(),
        "Extracted palette"
    );
    Ok(palette)
}
