use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use server::backend::{BackendError, PreprintBackend, RpcSearchPayload};
use server::config::EdgeConfig;
use server::state::AppState;
use tower::ServiceExt;

pub const PREPRINT_ID: &str = "7d0c6a52-8f0e-4a43-9a55-3c1f0e6a9d11";

/// Canned answer for the fake search RPC.
#[derive(Clone)]
pub enum SearchReply {
    Json(Value),
    Status(u16, String),
    Unreachable,
}

/// Canned answer for the fake signing call.
#[derive(Clone)]
pub enum SignReply {
    Url(String),
    Missing,
    Status(u16, String),
    Unreachable,
}

/// In-memory backend that records every call it receives.
pub struct FakeBackend {
    search_reply: SearchReply,
    sign_reply: SignReply,
    pub searches: Mutex<Vec<RpcSearchPayload>>,
    pub signs: Mutex<Vec<(String, String, u64)>>,
}

impl FakeBackend {
    pub fn new(search_reply: SearchReply, sign_reply: SignReply) -> Arc<Self> {
        Arc::new(Self {
            search_reply,
            sign_reply,
            searches: Mutex::new(Vec::new()),
            signs: Mutex::new(Vec::new()),
        })
    }

    pub fn searching(reply: SearchReply) -> Arc<Self> {
        Self::new(reply, SignReply::Missing)
    }

    pub fn signing(reply: SignReply) -> Arc<Self> {
        Self::new(SearchReply::Unreachable, reply)
    }

    pub fn recorded_searches(&self) -> Vec<RpcSearchPayload> {
        self.searches.lock().unwrap().clone()
    }

    pub fn recorded_signs(&self) -> Vec<(String, String, u64)> {
        self.signs.lock().unwrap().clone()
    }
}

#[async_trait]
impl PreprintBackend for FakeBackend {
    async fn search_preprints(
        &self,
        payload: &RpcSearchPayload,
    ) -> Result<Value, BackendError> {
        self.searches.lock().unwrap().push(payload.clone());
        match &self.search_reply {
            SearchReply::Json(v) => Ok(v.clone()),
            SearchReply::Status(status, body) => Err(BackendError::Status {
                status: *status,
                body: body.clone(),
            }),
            SearchReply::Unreachable => {
                Err(BackendError::Transport("connection refused".to_string()))
            }
        }
    }

    async fn sign_object(
        &self,
        bucket: &str,
        object_path: &str,
        expires_in_secs: u64,
    ) -> Result<Option<String>, BackendError> {
        self.signs.lock().unwrap().push((
            bucket.to_string(),
            object_path.to_string(),
            expires_in_secs,
        ));
        match &self.sign_reply {
            SignReply::Url(url) => Ok(Some(url.clone())),
            SignReply::Missing => Ok(None),
            SignReply::Status(status, body) => Err(BackendError::Status {
                status: *status,
                body: body.clone(),
            }),
            SignReply::Unreachable => {
                Err(BackendError::Transport("connection refused".to_string()))
            }
        }
    }
    /// Reachability follows the scripted search reply.
    async fn ping(&self) -> Result<(), BackendError> {
        match &self.search_reply {
            SearchReply::Json(_) => Ok(()),
            SearchReply::Status(status, body) => Err(BackendError::Status {
                status: *status,
                body: body.clone(),
            }),
            SearchReply::Unreachable => {
                Err(BackendError::Transport("connection refused".to_string()))
            }
        }
    }
}

pub fn test_config() -> EdgeConfig {
    EdgeConfig::from_lookup(|key| match key {
        "SUPABASE_URL" => Some("https://xyz.supabase.co".to_string()),
        "SUPABASE_SERVICE_ROLE" => Some("service-role-key".to_string()),
        _ => None,
    })
    .expect("test config is valid")
}

/// REST router over the given fake backend.
pub fn test_app(backend: Arc<FakeBackend>) -> Router {
    test_app_with_config(backend, test_config())
}

pub fn test_app_with_config(backend: Arc<FakeBackend>, config: EdgeConfig) -> Router {
    server::rest::api_router().with_state(AppState::new(backend, config))
}

/// Full edge router (docs, health, request ids) over the given fake backend.
pub fn edge_app(backend: Arc<FakeBackend>) -> Router {
    let state = AppState::new(backend, test_config());
    server::telemetry::with_http_tracing(server::openapi::edge_router(state))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// GET a route.
pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// Issue a bodiless request with an arbitrary method.
pub async fn request(app: &Router, method: &str, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// Browser-style CORS preflight for a GET.
pub async fn preflight(app: &Router, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method("OPTIONS")
        .uri(uri)
        .header("origin", "https://preprints.example")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// POST JSON to a route.
pub async fn post_json(app: &Router, uri: &str, body: &str) -> TestResponse {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, req).await
}

async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// Assert the permissive CORS headers are present.
pub fn assert_cors(response: &TestResponse) {
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert_eq!(
        response.header("access-control-allow-methods"),
        Some("GET, OPTIONS")
    );
}
