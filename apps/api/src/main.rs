mod config;
mod db;
mod errors;
mod intake;
mod llm_client;
mod models;
mod persistence;
mod routes;
mod scoring;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::intake::job_fetcher::JobFetcher;
use crate::llm_client::GeminiClient;
use crate::persistence::{DisabledScoreStore, PgScoreStore, ScoreStore};
use crate::routes::build_router;
use crate::scoring::orchestrator::ScoringOrchestrator;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting talentmatch v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (fails fast without a credential)
    let llm = GeminiClient::from_config(&config).context("LLM client configuration")?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm.model(),
        config.llm_timeout_secs
    );
    let scorer = Arc::new(ScoringOrchestrator::new(Arc::new(llm)));

    // Initialize score persistence
    let store: Arc<dyn ScoreStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgScoreStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; scores will not be persisted");
            Arc::new(DisabledScoreStore)
        }
    };

    let job_fetcher = JobFetcher::new(Duration::from_secs(config.job_fetch_timeout_secs))
        .context("Failed to build job fetcher HTTP client")?;

    let state = AppState {
        scorer,
        job_fetcher,
        store,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
