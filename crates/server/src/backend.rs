use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::EdgeError;

use crate::config::EdgeConfig;

/// Arguments of the `search_preprints` RPC. Absent filters are sent as
/// explicit `null`s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcSearchPayload {
    pub keyword: String,
    pub subject_slug: Option<String>,
    pub author_fragment: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub limit_rows: u32,
    pub offset_rows: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend answered, but not with a 2xx.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend request failed: {0}")]
    Transport(String),
    #[error("backend response could not be decoded: {0}")]
    Decode(String),
}

impl From<BackendError> for EdgeError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Status { status, body } => EdgeError::backend(status, body),
            BackendError::Transport(msg) => EdgeError::unreachable(msg),
            // The upstream answered 2xx with a body we cannot read.
            BackendError::Decode(msg) => EdgeError::internal(msg).with_status(502),
        }
    }
}

// ── Trait ────────────────────────────────────────────────────────────

/// Database and storage operations the edge functions need.
#[async_trait]
pub trait PreprintBackend: Send + Sync {
    /// Invoke the `search_preprints` RPC and return its JSON result untouched.
    async fn search_preprints(
        &self,
        payload: &RpcSearchPayload,
    ) -> Result<serde_json::Value, BackendError>;

    /// Create a time-limited download URL for `bucket/object_path`.
    ///
    /// `Ok(None)` means the backend accepted the request but returned no URL.
    async fn sign_object(
        &self,
        bucket: &str,
        object_path: &str,
        expires_in_secs: u64,
    ) -> Result<Option<String>, BackendError>;

    /// Cheap round trip used by the health check.
    async fn ping(&self) -> Result<(), BackendError>;
}

/// Upper bound on a health-check round trip.
const PING_TIMEOUT: Duration = Duration::from_secs(3);

// ── Supabase implementation ─────────────────────────────────────────

/// Talks to the Supabase REST and storage APIs with the service-role key.
pub struct SupabaseBackend {
    http: reqwest::Client,
    base_url: String,
    service_role: String,
}

#[derive(Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL", alias = "signedUrl", default)]
    signed_url: Option<String>,
}

impl SupabaseBackend {
    pub fn new(base_url: impl Into<String>, service_role: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_role: service_role.into(),
        }
    }

    pub fn from_config(config: &EdgeConfig) -> Self {
        Self::new(&config.backend_url, &config.service_role)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_role)
            .bearer_auth(&self.service_role)
    }

    /// Storage may hand back a path relative to `/storage/v1`.
    fn absolute_signed_url(&self, signed: &str) -> String {
        if signed.starts_with("http://") || signed.starts_with("https://") {
            return signed.to_string();
        }
        let path = signed.trim_start_matches('/');
        format!("{}/storage/v1/{}", self.base_url, path)
    }
}

/// Percent-encode each segment of an object path, keeping the `/` separators.
fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

async fn failure_from(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    BackendError::Status { status, body }
}

#[async_trait]
impl PreprintBackend for SupabaseBackend {
    #[tracing::instrument(skip(self), fields(limit = payload.limit_rows, offset = payload.offset_rows))]
    async fn search_preprints(
        &self,
        payload: &RpcSearchPayload,
    ) -> Result<serde_json::Value, BackendError> {
        let url = format!("{}/rest/v1/rpc/search_preprints", self.base_url);
        let response = self
            .authorized(self.http.post(&url))
            .json(payload)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure_from(response).await);
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn sign_object(
        &self,
        bucket: &str,
        object_path: &str,
        expires_in_secs: u64,
    ) -> Result<Option<String>, BackendError> {
        let url = format!(
            "{}/storage/v1/object/sign/{}/{}",
            self.base_url,
            urlencoding::encode(bucket),
            encode_object_path(object_path)
        );
        let expires = expires_in_secs.to_string();
        let response = self
            .authorized(self.http.post(&url))
            .query(&[("download", ""), ("expiresIn", expires.as_str())])
            .json(&serde_json::json!({ "expiresIn": expires_in_secs }))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure_from(response).await);
        }

        let signed: SignResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(signed
            .signed_url
            .filter(|u| !u.is_empty())
            .map(|u| self.absolute_signed_url(&u)))
    }

    #[tracing::instrument(skip(self))]
    async fn ping(&self) -> Result<(), BackendError> {
        let response = self
            .authorized(self.http.get(format!("{}/rest/v1/", self.base_url)))
            .timeout(PING_TIMEOUT)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure_from(response).await);
        }
        Ok(())
    }
}
