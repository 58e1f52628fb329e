use axum::{
    extract::{RawQuery, State},
    http::Method,
    Json,
};
use shared_types::{
    parse_query_pairs, EdgeError, SearchEnvelope, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

use crate::backend::RpcSearchPayload;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Raw query parameters of `GET /api/search`. Everything arrives as text and
/// is interpreted by the handler, so malformed numbers never fail extraction.
#[derive(Debug, Clone, Default, PartialEq, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Full-text keywords.
    pub q: Option<String>,
    /// Subject slug.
    pub subject: Option<String>,
    /// Author name fragment.
    pub author: Option<String>,
    /// Inclusive lower date bound (`YYYY-MM-DD`).
    pub from: Option<String>,
    /// Inclusive upper date bound (`YYYY-MM-DD`).
    pub to: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Results per page (default 20, max 100).
    #[param(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl SearchParams {
    /// Read the parameters from a raw query string. A repeated key keeps its
    /// last value; unknown keys are ignored.
    pub fn from_raw_query(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        for (key, value) in parse_query_pairs(raw.unwrap_or_default()) {
            let slot = match key.as_str() {
                "q" => &mut params.q,
                "subject" => &mut params.subject,
                "author" => &mut params.author,
                "from" => &mut params.from,
                "to" => &mut params.to,
                "page" => &mut params.page,
                "pageSize" => &mut params.page_size,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the requested page size. A missing value takes the configured
/// default; zero, negative or non-numeric values fall back to 20.
///
/// Any numeric spelling counts (`150`, `150.5`, `1e3`), and anything at or
/// above the ceiling clamps to it, however large. Fractions are truncated.
pub fn safe_page_size(raw: Option<&str>, configured_default: u32) -> u32 {
    let parsed = match raw {
        Some(v) => v.trim().parse::<f64>().ok(),
        None => Some(f64::from(configured_default)),
    };
    match parsed {
        Some(n) if n >= 1.0 => n.min(f64::from(MAX_PAGE_SIZE)) as u32,
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Parse the 1-based page number. Missing means page 1.
pub fn parse_page(raw: Option<&str>) -> Result<u32, EdgeError> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(EdgeError::invalid_page(raw)),
    }
}

pub fn row_offset(page: u32, page_size: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(page_size)
}

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Map request parameters onto the RPC argument object.
pub fn build_payload(params: &SearchParams, page: u32, page_size: u32) -> RpcSearchPayload {
    RpcSearchPayload {
        keyword: params.q.as_deref().unwrap_or_default().trim().to_string(),
        subject_slug: present(&params.subject),
        author_fragment: present(&params.author),
        from_date: present(&params.from),
        to_date: present(&params.to),
        limit_rows: page_size,
        offset_rows: row_offset(page, page_size),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Search preprints through the `search_preprints` RPC.
///
/// The RPC result is forwarded untouched inside `data`.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "RPC result with the effective paging"),
        (status = 400, description = "Invalid page number", body = EdgeError),
        (status = 405, description = "Method not allowed", body = EdgeError),
        (status = 502, description = "Backend failure", body = EdgeError)
    ),
    tag = "search"
)]
pub async fn search_preprints(
    method: Method,
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<SearchEnvelope<serde_json::Value>>, EdgeError> {
    // `get` also routes HEAD here.
    if method != Method::GET {
        return Err(EdgeError::method_not_allowed());
    }

    let params = SearchParams::from_raw_query(raw.as_deref());
    let page = parse_page(params.page.as_deref())?;
    let page_size = safe_page_size(params.page_size.as_deref(), state.config.default_page_size);
    let payload = build_payload(&params, page, page_size);

    tracing::debug!(
        page,
        page_size,
        has_keyword = !payload.keyword.is_empty(),
        "forwarding search to backend"
    );

    let data = state
        .backend
        .search_preprints(&payload)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "search_preprints RPC failed");
            EdgeError::from(e)
        })?;

    Ok(Json(SearchEnvelope {
        data,
        page,
        page_size,
    }))
}

/// Any verb other than GET on the search route.
pub async fn method_not_allowed() -> EdgeError {
    EdgeError::method_not_allowed()
}
