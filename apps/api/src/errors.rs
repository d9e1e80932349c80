use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::intake::resume::ResumeError;
use crate::llm_client::GenerationError;
use crate::scoring::orchestrator::PipelineError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scoring error: {0}")]
    Scoring(#[from] PipelineError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ResumeError> for AppError {
    fn from(e: ResumeError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Scoring(PipelineError::NoStructuredOutput {
                first_preview,
                second_preview,
            }) => {
                tracing::warn!(
                    "No structured output after repair; first: {first_preview}; second: {second_preview}"
                );
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "NO_STRUCTURED_OUTPUT",
                    "Model did not return a JSON object.".to_string(),
                )
            }
            AppError::Scoring(PipelineError::Generation(GenerationError::Timeout(after))) => {
                tracing::error!("LLM timed out after {after:?}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "LLM_TIMEOUT",
                    "The AI scoring service timed out".to_string(),
                )
            }
            AppError::Scoring(PipelineError::Generation(e)) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
