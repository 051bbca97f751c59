//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::models::AppConfig;
use crate::rendering::PageRenderer;
use crate::services::{BackdropPipeline, HttpImageFetcher, ImageFetcher};

/// Multipart framing allowance on top of the configured upload size
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<BackdropPipeline>,
    pub renderer: Arc<PageRenderer>,
    pub max_upload_bytes: usize,
}

impl FromRef<AppState> for Arc<BackdropPipeline> {
    fn from_ref(state: &AppState) -> Self {
        state.pipeline.clone()
    }
}

impl FromRef<AppState> for Arc<PageRenderer> {
    fn from_ref(state: &AppState) -> Self {
        state.renderer.clone()
    }
}

/// Create application state from an asset loader, with environment
/// overrides applied to the loaded config.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader).with_env_overrides();
    create_app_state_with(&config, &asset_loader, Arc::new(HttpImageFetcher::new()))
}

/// Create application state from an explicit config and image fetcher.
pub fn create_app_state_with(
    config: &AppConfig,
    asset_loader: &AssetLoader,
    fetcher: Arc<dyn ImageFetcher>,
) -> anyhow::Result<AppState> {
    let renderer = PageRenderer::new(asset_loader)
        .map_err(|e| anyhow::anyhow!("Failed to create page renderer: {e}"))?;
    let pipeline = BackdropPipeline::with_fetcher(config, fetcher);

    tracing::info!(
        variant = %config.variant,
        result_cap = pipeline.profile().result_cap,
        "Page session ready"
    );

    Ok(AppState {
        pipeline: Arc::new(pipeline),
        renderer: Arc::new(renderer),
        max_upload_bytes: config.upload.max_bytes,
    })
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        // Page and form endpoints
        .route("/", get(api::handle_page))
        .route("/search", get(api::handle_search))
        .route("/select", get(api::handle_select))
        .route(
            "/upload",
            post(api::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/local/:id", get(api::handle_local))
        // JSON state
        .route("/api/state", get(api::handle_state))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
