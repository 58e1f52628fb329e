use std::time::Duration;

use shared_types::DEFAULT_PAGE_SIZE;

/// Client-side knobs for the search page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Origin of the edge functions, e.g. `http://127.0.0.1:8787`. Empty means
    /// same-origin.
    pub api_base: String,
    pub endpoint: String,
    pub page_size: u32,
    /// Quiet period before a free-text edit triggers a search.
    pub debounce: Duration,
    /// Page that shows a single preprint; cards link to `<detail_path>?id=<id>`.
    pub detail_path: String,
    /// Abstract previews are cut to this many characters.
    pub preview_chars: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            endpoint: "/api/search".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(400),
            detail_path: "/preprint.html".to_string(),
            preview_chars: 300,
        }
    }
}

impl SearchSettings {
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Absolute (or same-origin) URL of the search endpoint.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.api_base, self.endpoint)
    }
}
