use std::sync::Arc;

use crate::backend::PreprintBackend;
use crate::config::EdgeConfig;

/// Shared state handed to every edge-function handler.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn PreprintBackend>,
    pub config: Arc<EdgeConfig>,
}

impl AppState {
    pub fn new(backend: Arc<dyn PreprintBackend>, config: EdgeConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }
}
