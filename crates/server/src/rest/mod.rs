pub mod pdf;
pub mod search;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{any, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the edge-function router: search proxy and PDF proxy.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(search_routes())
        .merge(pdf_routes())
        .layer(middleware::from_fn(cors_headers))
}

/// Search proxy. No `CorsLayer` here: it would answer OPTIONS preflights,
/// and every verb but GET must get the 405 envelope.
fn search_routes() -> Router<AppState> {
    Router::new().route(
        "/api/search",
        get(search::search_preprints).fallback(search::method_not_allowed),
    )
}

/// PDF signed-URL proxy. Browser preflights are answered by the CORS layer.
fn pdf_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/api/p", any(pdf::missing_id))
        .route("/api/p/", any(pdf::missing_id))
        .route("/api/p/{id}", get(pdf::redirect_to_pdf))
        .route("/api/p/{id}/", get(pdf::redirect_to_pdf))
        .route("/api/p/{id}/{*filename}", get(pdf::redirect_to_pdf))
        .layer(cors)
}

/// Stamp the fixed CORS header set on every edge-function response,
/// including errors and redirects.
pub async fn cors_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}
