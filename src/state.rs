use std::sync::Arc;

use crate::application::services::UrlShortener;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<dyn UrlShortener>,
    /// Prefix prepended to a short code in shorten responses.
    pub base_url: String,
}

impl AppState {
    pub fn new(shortener: Arc<dyn UrlShortener>, base_url: impl Into<String>) -> Self {
        Self {
            shortener,
            base_url: base_url.into(),
        }
    }

    /// Full public link for a short code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}{}", self.base_url, code)
    }
}
