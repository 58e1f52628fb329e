use async_trait::async_trait;
use shared_types::{EdgeError, SearchQuery, SearchResponse};

use crate::form::FormState;
use crate::view::ResultsView;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("search request failed: {0}")]
    Transport(String),
    /// Non-2xx from the search endpoint. `error` holds the envelope when the
    /// body was one.
    #[error("search endpoint returned {status}")]
    Status {
        status: u16,
        error: Option<EdgeError>,
    },
    #[error("search response could not be decoded: {0}")]
    Decode(String),
}

/// Where the search controller sends UI updates and reads the location.
pub trait SearchPort: Send + Sync {
    /// Replace whatever the results area currently shows.
    fn show(&self, view: ResultsView);

    /// Put values into the form controls.
    fn prefill(&self, form: &FormState);

    /// Current location query string, with or without a leading `?`.
    fn location_query(&self) -> String;

    /// Replace (not push) the location's query string.
    fn replace_location_query(&self, query: &str);
}

/// Transport used to run a search.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, ClientError>;
}
