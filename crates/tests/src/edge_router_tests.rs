use axum::http::StatusCode;
use serde_json::json;

use crate::common::{self, FakeBackend, SearchReply};

#[tokio::test]
async fn test_health_reports_ok() {
    let app = common::edge_app(FakeBackend::searching(SearchReply::Json(json!([]))));

    let res = common::get(&app, "/health").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "reachable");
    assert!(body["uptime_seconds"].is_u64());
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_is_degraded_when_backend_is_down() {
    let app = common::edge_app(FakeBackend::searching(SearchReply::Unreachable));

    let res = common::get(&app, "/health").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "degraded");
    assert!(body["backend"]
        .as_str()
        .unwrap()
        .starts_with("unreachable: "));

    let app = common::edge_app(FakeBackend::searching(SearchReply::Status(
        401,
        "bad key".to_string(),
    )));
    let res = common::get(&app, "/health").await;
    assert_eq!(res.json()["backend"], "status 401");
}

#[tokio::test]
async fn test_openapi_document_lists_edge_routes() {
    let app = common::edge_app(FakeBackend::searching(SearchReply::Unreachable));

    let res = common::get(&app, "/api/openapi.json").await;
    assert_eq!(res.status, StatusCode::OK);
    let paths = &res.json()["paths"];
    assert!(paths.get("/api/search").is_some());
    assert!(paths.get("/api/p/{id}/{filename}").is_some());
    assert!(paths.get("/health").is_some());
}

#[tokio::test]
async fn test_docs_are_served() {
    let app = common::edge_app(FakeBackend::searching(SearchReply::Unreachable));

    let res = common::get(&app, "/docs").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.to_lowercase().contains("<html"));
}

#[tokio::test]
async fn test_request_id_is_generated_and_echoed() {
    let app = common::edge_app(FakeBackend::searching(SearchReply::Json(
        serde_json::json!([]),
    )));

    let res = common::get(&app, "/api/search").await;
    assert_eq!(res.status, StatusCode::OK);
    let id = res.header("x-request-id").unwrap();
    assert_eq!(id.len(), 36);
}
