use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, FakeBackend, SearchReply};

fn rows() -> serde_json::Value {
    json!({
        "total": 45,
        "results": [
            {"id": common::PREPRINT_ID, "title": "Statins in HFpEF", "authors": "A. Author",
             "subject": "cardiology", "posted_at": "2024-03-15T12:00:00Z", "abstract": "We studied..."}
        ]
    })
}

#[tokio::test]
async fn test_search_wraps_rpc_result_in_envelope() {
    let backend = FakeBackend::searching(SearchReply::Json(rows()));
    let app = common::test_app(backend.clone());

    let res = common::get(&app, "/api/search?q=statins&page=3&pageSize=20").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "data": rows(), "page": 3, "pageSize": 20 }));
    common::assert_cors(&res);

    let calls = backend.recorded_searches();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].keyword, "statins");
    assert_eq!(calls[0].limit_rows, 20);
    assert_eq!(calls[0].offset_rows, 40);
}

#[tokio::test]
async fn test_search_defaults_without_params() {
    let backend = FakeBackend::searching(SearchReply::Json(json!({"total": 0, "results": []})));
    let app = common::test_app(backend.clone());

    let res = common::get(&app, "/api/search").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["page"], 1);
    assert_eq!(res.json()["pageSize"], 20);

    let payload = serde_json::to_value(&backend.recorded_searches()[0]).unwrap();
    assert_eq!(
        payload,
        json!({
            "keyword": "",
            "subject_slug": null,
            "author_fragment": null,
            "from_date": null,
            "to_date": null,
            "limit_rows": 20,
            "offset_rows": 0
        })
    );
}

#[tokio::test]
async fn test_search_forwards_filters() {
    let backend = FakeBackend::searching(SearchReply::Json(json!([])));
    let app = common::test_app(backend.clone());

    let res = common::get(
        &app,
        "/api/search?q=%20sepsis%20&subject=infectious-diseases&author=O%27Neil&from=2024-01-01&to=2024-12-31",
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);

    let call = &backend.recorded_searches()[0];
    assert_eq!(call.keyword, "sepsis");
    assert_eq!(call.subject_slug.as_deref(), Some("infectious-diseases"));
    assert_eq!(call.author_fragment.as_deref(), Some("O'Neil"));
    assert_eq!(call.from_date.as_deref(), Some("2024-01-01"));
    assert_eq!(call.to_date.as_deref(), Some("2024-12-31"));
}

#[tokio::test]
async fn test_search_caps_page_size() {
    let backend = FakeBackend::searching(SearchReply::Json(json!([])));
    let app = common::test_app(backend.clone());

    for raw in ["500", "99999999999999999999", "1e3", "150.5"] {
        let res = common::get(&app, &format!("/api/search?pageSize={raw}")).await;
        assert_eq!(res.json()["pageSize"], 100, "pageSize={raw}");
    }
    assert!(backend
        .recorded_searches()
        .iter()
        .all(|payload| payload.limit_rows == 100));
}

#[tokio::test]
async fn test_search_bad_page_size_falls_back_to_twenty() {
    let backend = FakeBackend::searching(SearchReply::Json(json!([])));
    let app = common::test_app(backend.clone());

    for raw in ["0", "-5", "lots"] {
        let res = common::get(&app, &format!("/api/search?pageSize={raw}")).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.json()["pageSize"], 20, "pageSize={raw}");
    }
}

#[tokio::test]
async fn test_search_uses_configured_default_page_size() {
    let backend = FakeBackend::searching(SearchReply::Json(json!([])));
    let config = server::config::EdgeConfig::from_lookup(|key| match key {
        "SUPABASE_URL" => Some("https://xyz.supabase.co".to_string()),
        "SUPABASE_SERVICE_ROLE" => Some("k".to_string()),
        "DEFAULT_PAGE_SIZE" => Some("50".to_string()),
        _ => None,
    })
    .unwrap();
    let app = common::test_app_with_config(backend.clone(), config);

    let res = common::get(&app, "/api/search?q=x").await;
    assert_eq!(res.json()["pageSize"], 50);
    assert_eq!(backend.recorded_searches()[0].limit_rows, 50);
}

#[tokio::test]
async fn test_search_rejects_invalid_page_without_calling_backend() {
    let backend = FakeBackend::searching(SearchReply::Json(json!([])));
    let app = common::test_app(backend.clone());

    for raw in ["0", "abc", "-2"] {
        let res = common::get(&app, &format!("/api/search?page={raw}")).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "page={raw}");
        assert_eq!(res.json()["error"], "invalid_page");
        common::assert_cors(&res);
    }
    assert!(backend.recorded_searches().is_empty());
}

#[tokio::test]
async fn test_search_relays_backend_failure_verbatim() {
    let backend = FakeBackend::searching(SearchReply::Status(
        500,
        r#"{"message":"db timeout"}"#.to_string(),
    ));
    let app = common::test_app(backend);

    let res = common::get(&app, "/api/search?q=x").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.json(),
        json!({ "error": "backend_error", "details": "{\"message\":\"db timeout\"}" })
    );
    common::assert_cors(&res);
}

#[tokio::test]
async fn test_search_relays_backend_client_error_status() {
    let backend = FakeBackend::searching(SearchReply::Status(404, "no such function".to_string()));
    let app = common::test_app(backend);

    let res = common::get(&app, "/api/search").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["details"], "no such function");
}

#[tokio::test]
async fn test_search_unreachable_backend_is_bad_gateway() {
    let app = common::test_app(FakeBackend::searching(SearchReply::Unreachable));

    let res = common::get(&app, "/api/search").await;
    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    assert_eq!(res.json()["error"], "backend_unreachable");
}

#[tokio::test]
async fn test_search_rejects_other_methods() {
    let backend = FakeBackend::searching(SearchReply::Json(json!([])));
    let app = common::test_app(backend.clone());

    let res = common::post_json(&app, "/api/search", r#"{"q":"x"}"#).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.json()["error"], "method_not_allowed");
    common::assert_cors(&res);

    for method in ["DELETE", "HEAD", "OPTIONS"] {
        let res = common::request(&app, method, "/api/search?q=x").await;
        assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
        common::assert_cors(&res);
    }

    assert!(backend.recorded_searches().is_empty());
}

#[tokio::test]
async fn test_search_repeated_key_keeps_last_value() {
    let backend = FakeBackend::searching(SearchReply::Json(json!([])));
    let app = common::test_app(backend.clone());

    let res = common::get(&app, "/api/search?q=a&q=b&page=1&page=2").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["page"], 2);

    let payload = &backend.recorded_searches()[0];
    assert_eq!(payload.keyword, "b");
    assert_eq!(payload.offset_rows, 20);
}
