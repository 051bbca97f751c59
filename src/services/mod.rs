pub mod backdrop_pipeline;
pub mod gradient_composer;
pub mod image_host;
pub mod image_loader;
pub mod page_session;
pub mod palette_extractor;
pub mod resource_store;
pub mod results;
pub mod search_client;

pub use backdrop_pipeline::{BackdropPipeline, SearchOutcome};
pub use gradient_composer::{
    strategy_for, BrightnessPick, BrightnessSortStrategy, GradientStrategy, NamedRoleStrategy,
};
pub use image_host::ImageHost;
pub use image_loader::{ImageLoader, SelectedFile, VerifiedImage};
pub use page_session::{DisplayedImage, ExtractionTicket, PageSession, SessionSnapshot};
pub use palette_extractor::{
    palette_from_bytes, HttpImageFetcher, ImageFetcher, ImageSource, PaletteExtractor,
};
pub use resource_store::{LocalHandle, LocalImage, LocalResourceStore, StoreStats, LOCAL_URL_PREFIX};
pub use results::{ResultCard, ResultsView, NO_RESULTS_MESSAGE, SEARCH_FAILED_MESSAGE};
pub use search_client::{encode_component, SearchClient, SearchQuery};
