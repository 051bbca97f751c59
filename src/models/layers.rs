use serde::Serialize;
use utoipa::ToSchema;

use super::gradient::ComposedLayers;

/// The stacked visual layers of the page.
///
/// Background values are stored as rendered CSS so the page template and the
/// JSON state endpoint see exactly what gets applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct LayerStack {
    /// `background-image` of the blurred layer
    pub blur_image: Option<String>,
    /// `background` of the color layer
    pub color: Option<String>,
    /// `background` of the wash layer
    pub wash: Option<String>,
    /// Source of the sharp foreground image
    pub foreground_src: Option<String>,
    pub foreground_visible: bool,
    pub placeholder_hidden: bool,
    /// A palette extraction for the current image has not completed yet
    pub palette_pending: bool,
}

impl LayerStack {
    /// Show `url` as the foreground and hide the placeholder.
    pub fn show_image(&mut self, url: &str, with_blur: bool) {
        self.foreground_src = Some(url.to_string());
        self.foreground_visible = true;
        self.placeholder_hidden = true;
        if with_blur {
            self.blur_image = Some(format!("url(\"{url}\")"));
        }
    }

    /// Overwrite the color layer backgrounds in full.
    pub fn paint(&mut self, composed: &ComposedLayers) {
        self.color = Some(composed.color.to_string());
        if let Some(wash) = &composed.wash {
            self.wash = Some(wash.to_string());
        }
        self.palette_pending = false;
    }
}
