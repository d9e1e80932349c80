use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const CREATE_CANDIDATE_SCORES: &str = r#"
CREATE TABLE IF NOT EXISTS candidate_scores (
    id              UUID PRIMARY KEY,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
    candidate_name  TEXT NOT NULL,
    candidate_email TEXT NOT NULL,
    job_url         TEXT NOT NULL,
    score           DOUBLE PRECISION NOT NULL,
    subscores_json  TEXT NOT NULL,
    notes           TEXT NOT NULL
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `candidate_scores` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_CANDIDATE_SCORES).execute(pool).await?;
    info!("candidate_scores table ready");
    Ok(())
}
