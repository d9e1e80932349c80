use std::sync::Arc;

use crate::intake::job_fetcher::JobFetcher;
use crate::persistence::ScoreStore;
use crate::scoring::orchestrator::ScoringOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<ScoringOrchestrator>,
    pub job_fetcher: JobFetcher,
    /// Pluggable score store. `DisabledScoreStore` when no database is configured.
    pub store: Arc<dyn ScoreStore>,
}
