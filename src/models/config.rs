use crate::assets::AssetLoader;
use crate::models::Variant;
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Page variant
    #[serde(default)]
    pub variant: Variant,

    /// Movie database endpoints and credentials
    #[serde(default)]
    pub tmdb: TmdbConfig,

    /// Upload limits
    #[serde(default)]
    pub upload: UploadConfig,

    /// Palette extraction tuning
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Movie database settings
#[derive(Debug, Deserialize, Clone)]
pub struct TmdbConfig {
    /// API key sent as the `api_key` query parameter
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the search API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL of the image host, including the trailing slash
    #[serde(default = "default_image_base")]
    pub image_base: String,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p/".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base: default_image_base(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_max_bytes() -> usize {
    20 * 1024 * 1024
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaletteConfig {
    /// Sample every n-th pixel
    #[serde(default = "default_quality")]
    pub quality: usize,

    /// Quantizer target color count
    #[serde(default = "default_color_count")]
    pub color_count: usize,

    /// Images are down-sampled to fit this box before quantizing
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

fn default_quality() -> usize {
    5
}

fn default_color_count() -> usize {
    64
}

fn default_max_dimension() -> u32 {
    256
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            quality: default_quality(),
            color_count: default_color_count(),
            max_dimension: default_max_dimension(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        variant = %config.variant,
                        base_url = %config.tmdb.base_url,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Apply `TMDB_API_KEY` and `BACKDROP_VARIANT` from the environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("TMDB_API_KEY").ok(),
            std::env::var("BACKDROP_VARIANT").ok(),
        )
    }

    /// Apply explicit overrides. An unparseable variant keeps the configured one.
    pub fn with_overrides(mut self, api_key: Option<String>, variant: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.tmdb.api_key = key.trim().to_string();
        }

        if let Some(raw) = variant {
            match raw.parse::<Variant>() {
                Ok(v) => self.variant = v,
                Err(e) => tracing::warn!(%e, "Ignoring variant override"),
            }
        }

        if self.tmdb.api_key.is_empty() {
            tracing::warn!("No movie database API key configured, searches will fail");
        }

        self
    }
}
