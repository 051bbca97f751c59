pub mod config;
pub mod gradient;
pub mod layers;
pub mod search_result;
pub mod variant;

pub use config::{AppConfig, PaletteConfig, TmdbConfig, UploadConfig};
pub use gradient::{Background, ColorStop, ComposedLayers, CssColor, LinearGradient};
pub use layers::LayerStack;
pub use search_result::{parse_results, SearchResult};
pub use variant::{
    StrategyKind, ThumbnailSource, Variant, VariantProfile, BACKDROP_SIZE, THUMBNAIL_SIZE,
};
