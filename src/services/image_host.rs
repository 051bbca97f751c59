use crate::models::BACKDROP_SIZE;

/// Builds image URLs from the host base, a size token and a path fragment.
#[derive(Debug, Clone)]
pub struct ImageHost {
    base: String,
}

impl ImageHost {
    /// `base` should end with a slash, e.g. `https://image.tmdb.org/t/p/`.
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}{size}{path}`
    pub fn url(&self, size: &str, path: &str) -> String {
        format!("{}{}{}", self.base, size, path)
    }

    /// Full-size backdrop URL for a path fragment.
    pub fn backdrop_url(&self, path: &str) -> String {
        self.url(BACKDROP_SIZE, path)
    }

    /// Rewrite a full-size backdrop URL to a smaller rendition for palette
    /// sampling. URLs from elsewhere pass through unchanged.
    pub fn sample_url(&self, url: &str, sample_size: &str) -> String {
        let full_prefix = format!("{}{}", self.base, BACKDROP_SIZE);
        match url.strip_prefix(&full_prefix) {
            Some(path) => self.url(sample_size, path),
            None => url.to_string(),
        }
    }
}
