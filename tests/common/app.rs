//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use backdrop::assets::AssetLoader;
use backdrop::models::{AppConfig, TmdbConfig, Variant};
use backdrop::server::{build_router, create_app_state_with, AppState};
use backdrop::services::{BackdropPipeline, HttpImageFetcher};

use super::mock_server::MockHttpServer;

pub const TEST_API_KEY: &str = "test-key";

/// Test application with router and direct access to the pipeline
pub struct TestApp {
    router: axum::Router,
    pub pipeline: Arc<BackdropPipeline>,
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application whose movie API and image host are the
    /// given mock server
    pub fn new(variant: Variant, mock: &MockHttpServer) -> Self {
        Self::with_config(Self::config_for(variant, mock))
    }

    /// Config pointing at the mock server
    pub fn config_for(variant: Variant, mock: &MockHttpServer) -> AppConfig {
        AppConfig {
            variant,
            tmdb: TmdbConfig {
                api_key: TEST_API_KEY.to_string(),
                base_url: mock.url_for("/3"),
                image_base: mock.url_for("/t/p/"),
            },
            ..Default::default()
        }
    }

    pub fn with_config(config: AppConfig) -> Self {
        let state = Self::create_state(&config);
        let pipeline = state.pipeline.clone();
        let router = build_router(state);

        Self {
            router,
            pipeline,
            config,
        }
    }

    /// Create application state using embedded assets
    pub fn create_state(config: &AppConfig) -> AppState {
        let asset_loader = AssetLoader::new(None, None);
        create_app_state_with(config, &asset_loader, Arc::new(HttpImageFetcher::new()))
            .expect("Failed to create app state")
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a multipart POST request
    pub async fn post_multipart(
        &self,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", content_type)
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Fetch the JSON session state
    pub async fn state(&self) -> serde_json::Value {
        let response = self.get("/api/state").await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()
    }

    /// Poll until no palette extraction is pending
    pub async fn wait_for_palette(&self) -> serde_json::Value {
        for _ in 0..500 {
            let state = self.state().await;
            if state["layers"]["palette_pending"] == false {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("Palette extraction did not finish");
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
