use async_trait::async_trait;
use shared_types::{EdgeError, SearchEnvelope, SearchQuery, SearchResponse};

use crate::port::{ClientError, SearchClient};
use crate::settings::SearchSettings;

/// `SearchClient` that calls the search proxy over HTTP.
#[derive(Clone)]
pub struct HttpSearchClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSearchClient {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: settings.endpoint_url(),
        }
    }

    pub fn request_url(&self, query: &SearchQuery) -> String {
        format!("{}?{}", self.endpoint, query.to_query_string())
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    #[tracing::instrument(skip(self), fields(page = query.page))]
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, ClientError> {
        let response = self
            .http
            .get(self.request_url(query))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                error: EdgeError::from_body(&body),
            });
        }

        let envelope: SearchEnvelope<SearchResponse> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}
