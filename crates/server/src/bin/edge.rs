use std::sync::Arc;

use server::backend::SupabaseBackend;
use server::config::EdgeConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::telemetry::init_tracing();
    server::health::record_start_time();

    let config = EdgeConfig::from_env()?;
    let bind_addr = config.bind_addr;
    tracing::info!(backend = %config.backend_url, "loaded edge configuration");

    let backend = Arc::new(SupabaseBackend::from_config(&config));
    let state = AppState::new(backend, config);
    let app = server::telemetry::with_http_tracing(server::openapi::edge_router(state));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(%bind_addr, "edge functions listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("edge functions stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
