use tera::{Context, Tera};

use crate::assets::AssetLoader;
use crate::error::TemplateError;
use crate::services::SessionSnapshot;

/// Renders the page from a session snapshot. Output is HTML-escaped.
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub const TEMPLATE: &'static str = "index.html";

    pub fn new(loader: &AssetLoader) -> Result<Self, TemplateError> {
        let source = loader
            .read_template(Self::TEMPLATE)
            .map_err(|_| TemplateError::NotFound(Self::TEMPLATE.to_string()))?;
        Self::from_source(&source)
    }

    pub fn from_source(source: &str) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_template(Self::TEMPLATE, source)?;
        tracing::info!(template = Self::TEMPLATE, "Page renderer initialized");
        Ok(Self { tera })
    }

    pub fn render(&self, snapshot: &SessionSnapshot) -> Result<String, TemplateError> {
        let context = Context::from_serialize(snapshot)?;
        Ok(self.tera.render(Self::TEMPLATE, &context)?)
    }
}
