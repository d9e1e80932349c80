//! Score persistence — pluggable, trait-based store for scored candidates.
//!
//! Default: `PgScoreStore` when `DATABASE_URL` is set, `DisabledScoreStore`
//! otherwise. `AppState` holds an `Arc<dyn ScoreStore>`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::score::ScoreRecord;

#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn insert_score(&self, record: &ScoreRecord) -> Result<(), AppError>;
}

pub struct PgScoreStore {
    pool: PgPool,
}

impl PgScoreStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreStore for PgScoreStore {
    async fn insert_score(&self, record: &ScoreRecord) -> Result<(), AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO candidate_scores
                (id, created_at, candidate_name, candidate_email, job_url, score, subscores_json, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .bind(&record.candidate_name)
        .bind(&record.candidate_email)
        .bind(&record.job_url)
        .bind(record.score)
        .bind(&record.raw_json)
        .bind(&record.explanation)
        .execute(&self.pool)
        .await?;

        info!("Stored score {} for {}", id, record.job_url);
        Ok(())
    }
}

/// Used when no database is configured. Scores are logged and dropped.
pub struct DisabledScoreStore;

#[async_trait]
impl ScoreStore for DisabledScoreStore {
    async fn insert_score(&self, record: &ScoreRecord) -> Result<(), AppError> {
        debug!(
            "Persistence disabled; not storing score {:.1} for {}",
            record.score, record.job_url
        );
        Ok(())
    }
}
