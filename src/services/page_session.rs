//! The single page context: layers, results, busy state, the local resource
//! slot and the extraction generation counter.

use serde::Serialize;
use utoipa::ToSchema;

use super::{ImageHost, ImageSource, LocalHandle, LocalResourceStore, ResultsView};
use crate::models::{ComposedLayers, LayerStack, Variant, VariantProfile};

/// The image currently shown in the foreground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayedImage {
    Remote { url: String },
    Local { id: u64, url: String },
}

impl DisplayedImage {
    pub fn url(&self) -> &str {
        match self {
            DisplayedImage::Remote { url } | DisplayedImage::Local { url, .. } => url,
        }
    }

    /// Source the palette is sampled from.
    pub fn sample_source(&self, host: &ImageHost, sample_size: &str) -> ImageSource {
        match self {
            DisplayedImage::Remote { url } => ImageSource::Remote(host.sample_url(url, sample_size)),
            DisplayedImage::Local { id, .. } => ImageSource::Local(*id),
        }
    }
}

/// Permission to apply the palette of one displayed image.
///
/// Only the ticket of the most recently applied image is honored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionTicket {
    pub generation: u64,
    pub image: DisplayedImage,
}

/// Point-in-time copy of the session, used for rendering and the JSON state.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionSnapshot {
    pub variant: Variant,
    pub blur_layer: bool,
    pub color_layer: bool,
    pub wash_layer: bool,
    pub layers: LayerStack,
    pub results: Option<ResultsView>,
    pub searching: bool,
    pub displayed: Option<DisplayedImage>,
    pub file_control: Option<String>,
    pub generation: u64,
}

pub struct PageSession {
    profile: VariantProfile,
    layers: LayerStack,
    results: Option<ResultsView>,
    searches_in_flight: usize,
    local_slot: Option<LocalHandle>,
    displayed: Option<DisplayedImage>,
    file_control: Option<String>,
    generation: u64,
}

impl PageSession {
    pub fn new(profile: VariantProfile) -> Self {
        Self {
            profile,
            layers: LayerStack::default(),
            results: None,
            searches_in_flight: 0,
            local_slot: None,
            displayed: None,
            file_control: None,
            generation: 0,
        }
    }

    pub fn profile(&self) -> &VariantProfile {
        &self.profile
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    pub fn is_searching(&self) -> bool {
        self.searches_in_flight > 0
    }

    pub fn displayed(&self) -> Option<&DisplayedImage> {
        self.displayed.as_ref()
    }

    /// Name of the file currently held by the upload control, if any.
    pub fn file_control(&self) -> Option<&str> {
        self.file_control.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Id of the resource held in the local slot.
    pub fn local_slot_id(&self) -> Option<u64> {
        self.local_slot.as_ref().map(LocalHandle::id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            variant: self.profile.variant,
            blur_layer: self.profile.blur_layer,
            color_layer: self.profile.has_color_layer(),
            wash_layer: self.profile.has_wash_layer(),
            layers: self.layers.clone(),
            results: self.results.clone(),
            searching: self.is_searching(),
            displayed: self.displayed.clone(),
            file_control: self.file_control.clone(),
            generation: self.generation,
        }
    }

    /// Clear the results area and mark a search as running.
    pub fn begin_search(&mut self) {
        self.searches_in_flight += 1;
        self.results = None;
    }

    /// Show the outcome of a search. The last search to finish wins.
    pub fn finish_search(&mut self, view: ResultsView) {
        self.searches_in_flight = self.searches_in_flight.saturating_sub(1);
        self.results = Some(view);
    }

    /// Record the upload control's value while a file is being validated.
    pub fn select_file(&mut self, name: Option<String>) {
        self.file_control = name;
    }

    /// Reset the upload control so the same file can be chosen again.
    pub fn reset_file_control(&mut self) {
        self.file_control = None;
    }

    /// Display a local resource. The previous slot resource is released
    /// before the new handle takes the slot.
    pub fn apply_local(
        &mut self,
        handle: LocalHandle,
        store: &LocalResourceStore,
    ) -> Option<ExtractionTicket> {
        if let Some(previous) = self.local_slot.take() {
            store.release(previous);
        }

        let image = DisplayedImage::Local {
            id: handle.id(),
            url: handle.url(),
        };
        self.local_slot = Some(handle);
        self.file_control = None;
        self.apply_image(image)
    }

    /// Display a remote image. The local slot is left alone.
    pub fn apply_remote(&mut self, url: String) -> Option<ExtractionTicket> {
        self.apply_image(DisplayedImage::Remote { url })
    }

    fn apply_image(&mut self, image: DisplayedImage) -> Option<ExtractionTicket> {
        self.generation += 1;
        self.layers.show_image(image.url(), self.profile.blur_layer);
        self.displayed = Some(image.clone());

        tracing::debug!(
            generation = self.generation,
            url = %image.url(),
            "Applied image"
        );

        if self.profile.strategy.is_none() {
            return None;
        }

        self.layers.palette_pending = true;
        Some(ExtractionTicket {
            generation: self.generation,
            image,
        })
    }

    /// Paint the color layers if `generation` still names the displayed
    /// image. Returns whether anything was applied.
    pub fn apply_gradients(&mut self, generation: u64, composed: &ComposedLayers) -> bool {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "Discarding stale palette"
            );
            return false;
        }

        self.layers.paint(composed);
        true
    }

    /// Release the local slot, e.g. on shutdown.
    pub fn close(&mut self, store: &LocalResourceStore) {
        if let Some(handle) = self.local_slot.take() {
            store.release(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Background;

    fn composed(css: &'static str) -> ComposedLayers {
        ComposedLayers {
            color: Background::Linear(crate::models::LinearGradient::new(
                0.0,
                vec![crate::models::ColorStop::new(
                    crate::models::CssColor::Hex(css),
                    0,
                )],
            )),
            wash: None,
        }
    }

    #[test]
    fn test_initial_state() {
        let session = PageSession::new(Variant::DualGradient.profile());
        assert!(!session.layers().placeholder_hidden);
        assert!(!session.layers().foreground_visible);
        assert!(session.results().is_none());
        assert!(!session.is_searching());
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_apply_remote_issues_ticket() {
        let mut session = PageSession::new(Variant::DualGradient.profile());
        let ticket = session
            .apply_remote("https://img/w1280/a.jpg".to_string())
            .unwrap();

        assert_eq!(ticket.generation, 1);
        assert!(session.layers().foreground_visible);
        assert!(session.layers().placeholder_hidden);
        assert!(session.layers().palette_pending);
        assert!(session.layers().blur_image.is_none());
    }

    #[test]
    fn test_blur_variant_has_no_ticket() {
        let mut session = PageSession::new(Variant::Blur.profile());
        assert!(session.apply_remote("https://img/a.jpg".to_string()).is_none());
        assert_eq!(
            session.layers().blur_image.as_deref(),
            Some("url(\"https://img/a.jpg\")")
        );
        assert!(!session.layers().palette_pending);
    }

    #[test]
    fn test_stale_gradients_are_discarded() {
        let mut session = PageSession::new(Variant::NamedRole.profile());
        let first = session.apply_remote("https://img/a.jpg".to_string()).unwrap();
        let second = session.apply_remote("https://img/b.jpg".to_string()).unwrap();

        assert!(session.apply_gradients(second.generation, &composed("#bbb")));
        assert!(!session.apply_gradients(first.generation, &composed("#aaa")));
        assert_eq!(
            session.layers().color.as_deref(),
            Some("linear-gradient(0deg, #bbb 0%)")
        );
    }

    #[test]
    fn test_local_slot_holds_one_handle() {
        let store = LocalResourceStore::new();
        let mut session = PageSession::new(Variant::DualGradient.profile());

        session.apply_local(store.create(vec![1], "image/png"), &store);
        session.apply_local(store.create(vec![2], "image/png"), &store);

        let stats = store.stats();
        assert_eq!(stats.created, 2);
        assert_eq!(stats.released, 1);
        assert_eq!(stats.alive, 1);
        assert_eq!(session.local_slot_id(), Some(2));
    }

    #[test]
    fn test_remote_does_not_release_local() {
        let store = LocalResourceStore::new();
        let mut session = PageSession::new(Variant::DualGradient.profile());

        session.apply_local(store.create(vec![1], "image/png"), &store);
        session.apply_remote("https://img/a.jpg".to_string());

        assert_eq!(store.stats().alive, 1);
        assert!(matches!(
            session.displayed(),
            Some(DisplayedImage::Remote { .. })
        ));

        session.apply_local(store.create(vec![2], "image/png"), &store);
        assert_eq!(store.stats().alive, 1);
        assert_eq!(store.stats().released, 1);
    }

    #[test]
    fn test_apply_local_resets_file_control() {
        let store = LocalResourceStore::new();
        let mut session = PageSession::new(Variant::VanillaGradient.profile());
        session.select_file(Some("pic.png".to_string()));
        assert_eq!(session.file_control(), Some("pic.png"));

        session.apply_local(store.create(vec![1], "image/png"), &store);
        assert!(session.file_control().is_none());
    }

    #[test]
    fn test_search_busy_counter() {
        let mut session = PageSession::new(Variant::DualGradient.profile());
        session.begin_search();
        session.begin_search();
        assert!(session.is_searching());

        session.finish_search(ResultsView::failed());
        assert!(session.is_searching());
        session.finish_search(ResultsView::failed());
        assert!(!session.is_searching());
    }

    #[test]
    fn test_sample_source() {
        let host = ImageHost::new("https://img/");
        let remote = DisplayedImage::Remote {
            url: "https://img/w1280/a.jpg".to_string(),
        };
        assert_eq!(
            remote.sample_source(&host, "w185"),
            ImageSource::Remote("https://img/w185/a.jpg".to_string())
        );

        let local = DisplayedImage::Local {
            id: 4,
            url: "/local/4".to_string(),
        };
        assert_eq!(local.sample_source(&host, "w185"), ImageSource::Local(4));
    }

    #[test]
    fn test_close_releases_slot() {
        let store = LocalResourceStore::new();
        let mut session = PageSession::new(Variant::DualGradient.profile());
        session.apply_local(store.create(vec![1], "image/png"), &store);
        session.close(&store);
        assert_eq!(store.stats().alive, 0);
    }
}
