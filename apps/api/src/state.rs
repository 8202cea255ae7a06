use std::sync::Arc;

use tokio::sync::Mutex;

use crate::pipeline::Orchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    /// Held for the whole of a run. One run at a time keeps tracking-log appends serialized.
    pub run_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            run_lock: Arc::new(Mutex::new(())),
        }
    }
}
