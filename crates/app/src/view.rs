use shared_types::{total_pages, SearchResponse, SearchResult};

use crate::format_helpers::{format_date_local, truncate_preview};
use crate::settings::SearchSettings;

pub const SEARCHING_MESSAGE: &str = "Searching…";
pub const EMPTY_MESSAGE: &str = "No preprints found.";
pub const FAILED_MESSAGE: &str = "Search failed. Please try again later.";

/// Everything the results area can show. Each state fully replaces the
/// previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// Nothing searched yet.
    Idle,
    Searching,
    Empty,
    Failed,
    Results {
        cards: Vec<ResultCard>,
        pager: PagerView,
    },
}

impl ResultsView {
    pub fn pager(&self) -> Option<&PagerView> {
        match self {
            ResultsView::Results { pager, .. } => Some(pager),
            _ => None,
        }
    }

    /// Status line for the non-result states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ResultsView::Searching => Some(SEARCHING_MESSAGE),
            ResultsView::Empty => Some(EMPTY_MESSAGE),
            ResultsView::Failed => Some(FAILED_MESSAGE),
            ResultsView::Idle | ResultsView::Results { .. } => None,
        }
    }
}

/// Display-ready fields of one result. Values are plain text; escaping
/// happens at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub id: String,
    pub title: String,
    pub href: String,
    pub authors: String,
    pub posted: String,
    pub subject: String,
    pub preview: String,
}

impl ResultCard {
    pub fn from_result(result: &SearchResult, settings: &SearchSettings) -> Self {
        Self {
            id: result.id.clone(),
            title: result.title.clone(),
            href: format!(
                "{}?id={}",
                settings.detail_path,
                urlencoding::encode(&result.id)
            ),
            authors: result.authors.clone().unwrap_or_default(),
            posted: result
                .posted_at
                .as_deref()
                .map(format_date_local)
                .unwrap_or_default(),
            subject: result.subject.clone().unwrap_or_default(),
            preview: result
                .abstract_text
                .as_deref()
                .map(|text| truncate_preview(text, settings.preview_chars))
                .unwrap_or_default(),
        }
    }

    /// `date • subject`, skipping whichever part is missing.
    pub fn meta_line(&self) -> String {
        match (self.posted.is_empty(), self.subject.is_empty()) {
            (false, false) => format!("{} • {}", self.posted, self.subject),
            (false, true) => self.posted.clone(),
            (true, false) => self.subject.clone(),
            (true, true) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerView {
    pub page: u32,
    pub total_pages: u32,
}

impl PagerView {
    pub fn new(page: u32, total: u64, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            total_pages: total_pages(total, page_size),
        }
    }

    /// Target of the `Prev` button, `None` when disabled.
    pub fn prev(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    /// Target of the `Next` button, `None` when disabled.
    pub fn next(&self) -> Option<u32> {
        (self.page < self.total_pages).then(|| self.page + 1)
    }

    pub fn label(&self) -> String {
        format!("Page {} / {}", self.page, self.total_pages)
    }
}

/// Turn a search response into what the results area should show.
pub fn results_view(response: &SearchResponse, page: u32, settings: &SearchSettings) -> ResultsView {
    if response.results.is_empty() {
        return ResultsView::Empty;
    }
    ResultsView::Results {
        cards: response
            .results
            .iter()
            .map(|r| ResultCard::from_result(r, settings))
            .collect(),
        pager: PagerView::new(page, response.total, settings.page_size),
    }
}
