use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::error::LoadRejection;
use crate::models::{AppConfig, VariantProfile};
use crate::services::{
    strategy_for, ExtractionTicket, GradientStrategy, HttpImageFetcher, ImageFetcher, ImageHost,
    ImageLoader, LocalImage, LocalResourceStore, PageSession, PaletteExtractor, ResultsView,
    SearchClient, SearchQuery, SelectedFile, SessionSnapshot,
};

/// Outcome of a search submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was blank; nothing was sent
    Skipped,
    Completed(ResultsView),
}

/// Orchestrates search → select → display → extract → compose for the page
/// session.
///
/// The session lock is never held across an await point.
pub struct BackdropPipeline {
    session: RwLock<PageSession>,
    store: Arc<LocalResourceStore>,
    search_client: SearchClient,
    loader: ImageLoader,
    extractor: PaletteExtractor,
    composer: Option<Arc<dyn GradientStrategy>>,
    host: ImageHost,
    profile: VariantProfile,
}

impl BackdropPipeline {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_fetcher(config, Arc::new(HttpImageFetcher::new()))
    }

    pub fn with_fetcher(config: &AppConfig, fetcher: Arc<dyn ImageFetcher>) -> Self {
        let profile = config.variant.profile();
        let store = Arc::new(LocalResourceStore::new());

        Self {
            session: RwLock::new(PageSession::new(profile)),
            extractor: PaletteExtractor::new(fetcher, store.clone(), &config.palette),
            store,
            search_client: SearchClient::new(&config.tmdb.base_url, &config.tmdb.api_key),
            loader: ImageLoader::new(config.upload.max_bytes),
            composer: profile.strategy.map(strategy_for),
            host: ImageHost::new(&config.tmdb.image_base),
            profile,
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.read().await.snapshot()
    }

    pub fn profile(&self) -> &VariantProfile {
        &self.profile
    }

    pub fn store(&self) -> &LocalResourceStore {
        &self.store
    }

    pub fn host(&self) -> &ImageHost {
        &self.host
    }

    pub fn local_resource(&self, id: u64) -> Option<Arc<LocalImage>> {
        self.store.get(id)
    }

    /// Run a search and show its outcome. Failures become the inline
    /// failure message; the displayed image is never touched.
    pub async fn search(&self, raw_query: &str) -> SearchOutcome {
        let Some(query) = SearchQuery::parse(raw_query) else {
            return SearchOutcome::Skipped;
        };

        self.session.write().await.begin_search();

        let view = match self.search_client.search(&query).await {
            Ok(results) => ResultsView::from_results(&results, &self.profile, &self.host),
            Err(e) => {
                tracing::warn!(%e, query = %query.as_str(), "Search failed");
                ResultsView::failed()
            }
        };

        self.session.write().await.finish_search(view.clone());
        SearchOutcome::Completed(view)
    }

    /// Show the full-size backdrop for a result path.
    pub async fn apply_backdrop(&self, backdrop_path: &str) -> Option<ExtractionTicket> {
        let url = self.host.backdrop_url(backdrop_path);
        self.session.write().await.apply_remote(url)
    }

    /// Validate and show an uploaded file. Rejections leave the session
    /// unchanged apart from the upload control.
    pub async fn apply_file(
        &self,
        file: Option<SelectedFile>,
    ) -> Result<Option<ExtractionTicket>, LoadRejection> {
        let name = file.as_ref().and_then(|f| f.name.clone());
        self.session.write().await.select_file(name);

        let verified = match self.loader.verify(file).await {
            Ok(verified) => verified,
            Err(rejection) => {
                tracing::debug!(%rejection, "Ignoring selected file");
                return Err(rejection);
            }
        };

        let mut session = self.session.write().await;
        let handle = self.store.create(verified.bytes, verified.mime);
        Ok(session.apply_local(handle, &self.store))
    }

    /// [`apply_backdrop`](Self::apply_backdrop) and start extraction in the
    /// background.
    pub async fn select_backdrop(self: &Arc<Self>, backdrop_path: &str) -> Option<JoinHandle<bool>> {
        let ticket = self.apply_backdrop(backdrop_path).await?;
        Some(self.spawn_extraction(ticket))
    }

    /// [`apply_file`](Self::apply_file) and start extraction in the
    /// background.
    pub async fn select_file(
        self: &Arc<Self>,
        file: Option<SelectedFile>,
    ) -> Result<Option<JoinHandle<bool>>, LoadRejection> {
        let ticket = self.apply_file(file).await?;
        Ok(ticket.map(|t| self.spawn_extraction(t)))
    }

    pub fn spawn_extraction(self: &Arc<Self>, ticket: ExtractionTicket) -> JoinHandle<bool> {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move { pipeline.run_extraction(ticket).await })
    }

    /// Extract, compose and apply the gradients for `ticket`. Returns whether
    /// the result was applied; stale tickets are dropped.
    pub async fn run_extraction(&self, ticket: ExtractionTicket) -> bool {
        let (Some(composer), Some(sample_size)) = (self.composer.as_ref(), self.profile.sample_size)
        else {
            return false;
        };

        let source = ticket.image.sample_source(&self.host, sample_size);
        let palette = match self.extractor.extract(&source).await {
            Ok(palette) => Some(palette),
            Err(e) => {
                tracing::warn!(%e, generation = ticket.generation, "Palette extraction failed, using fallback");
                None
            }
        };

        let composed = composer.compose(palette.as_ref());
        self.session
            .write()
            .await
            .apply_gradients(ticket.generation, &composed)
    }

    /// Release anything the session still owns.
    pub async fn shutdown(&self) {
        self.session.write().await.close(&self.store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::models::Variant;
    use async_trait::async_trait;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    struct SolidFetcher;

    #[async_trait]
    impl ImageFetcher for SolidFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ExtractError> {
            let img = RgbaImage::from_pixel(16, 16, Rgba([200, 30, 30, 255]));
            let mut out = Cursor::new(Vec::new());
            img.write_to(&mut out, ImageFormat::Png)
                .map_err(|e| ExtractError::Fetch(e.to_string()))?;
            Ok(out.into_inner())
        }
    }

    fn pipeline(variant: Variant) -> Arc<BackdropPipeline> {
        let config = AppConfig {
            variant,
            ..Default::default()
        };
        Arc::new(BackdropPipeline::with_fetcher(&config, Arc::new(SolidFetcher)))
    }

    #[tokio::test]
    async fn test_blank_search_is_skipped() {
        let pipeline = pipeline(Variant::DualGradient);
        assert_eq!(pipeline.search("   ").await, SearchOutcome::Skipped);
        assert!(pipeline.snapshot().await.results.is_none());
    }

    #[tokio::test]
    async fn test_select_backdrop_paints_layers() {
        let pipeline = pipeline(Variant::VanillaGradient);
        let handle = pipeline.select_backdrop("/xyz.jpg").await.unwrap();
        assert!(handle.await.unwrap());

        let snapshot = pipeline.snapshot().await;
        assert_eq!(
            snapshot.layers.foreground_src.as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/xyz.jpg")
        );
        assert!(!snapshot.layers.palette_pending);
        assert!(snapshot
            .layers
            .color
            .unwrap()
            .starts_with("linear-gradient(60.64deg, rgb("));
    }

    #[tokio::test]
    async fn test_blur_variant_never_extracts() {
        let pipeline = pipeline(Variant::Blur);
        assert!(pipeline.select_backdrop("/xyz.jpg").await.is_none());
        assert!(pipeline.snapshot().await.layers.color.is_none());
    }

    #[tokio::test]
    async fn test_out_of_order_completion() {
        let pipeline = pipeline(Variant::NamedRole);
        let first = pipeline.apply_backdrop("/a.jpg").await.unwrap();
        let second = pipeline.apply_backdrop("/b.jpg").await.unwrap();

        assert!(pipeline.run_extraction(second).await);
        let painted = pipeline.snapshot().await.layers.color;
        assert!(!pipeline.run_extraction(first).await);
        assert_eq!(pipeline.snapshot().await.layers.color, painted);
    }
}
