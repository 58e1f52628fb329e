use axum::{routing::get, Json, Router};
use shared_types::{EdgeError, EdgeErrorKind};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::health::{self, HealthResponse};
use crate::rest;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::search::search_preprints,
        rest::pdf::redirect_to_pdf,
        health::health_check,
    ),
    components(schemas(EdgeError, EdgeErrorKind, HealthResponse)),
    tags(
        (name = "search", description = "Preprint search proxy"),
        (name = "pdf", description = "Signed PDF download redirects"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Preprint Edge API",
        description = "Search and PDF proxies in front of the preprint backend",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full edge router: REST routes, `/health`, the OpenAPI document
/// at `/api/openapi.json` and the API reference UI at `/docs`.
pub fn edge_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", get(health::health_check))
        .route("/api/openapi.json", get(openapi_json))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
