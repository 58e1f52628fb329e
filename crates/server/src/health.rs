use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

use crate::backend::BackendError;
use crate::state::AppState;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the process start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response. `status` is `degraded` while the backend cannot be
/// reached; the edge itself still answers 200.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// `reachable`, `status <code>` or `unreachable: <reason>`.
    pub backend: String,
    pub uptime_seconds: u64,
    pub version: String,
}

fn describe(outcome: &Result<(), BackendError>) -> String {
    match outcome {
        Ok(()) => "reachable".to_string(),
        Err(BackendError::Status { status, .. }) => format!("status {status}"),
        Err(e) => format!("unreachable: {e}"),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Edge is up; backend reachability in the body", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let outcome = state.backend.ping().await;
    if let Err(e) = &outcome {
        tracing::warn!(error = %e, "backend health probe failed");
    }

    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status: if outcome.is_ok() { "ok" } else { "degraded" }.to_string(),
        backend: describe(&outcome),
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
