//! Axum route handlers for the Scoring API.

use std::collections::BTreeMap;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::intake::resume::{extract_resume_text, ResumeUpload};
use crate::models::score::ScoreRecord;
use crate::scoring::decode::ScoreResult;
use crate::scoring::orchestrator::ScoreRequest;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: f64,
    pub subscores: BTreeMap<String, f64>,
    pub explanation: String,
}

impl From<ScoreResult> for ScoreResponse {
    fn from(result: ScoreResult) -> Self {
        Self {
            score: result.score,
            subscores: result.subscores,
            explanation: result.explanation,
        }
    }
}

/// Raw multipart fields, before validation.
#[derive(Debug, Default)]
struct ScoreForm {
    resume: Option<ResumeUpload>,
    job_url: Option<String>,
    job_text: Option<String>,
    candidate_name: Option<String>,
    candidate_email: Option<String>,
}

/// A validated scoring submission.
#[derive(Debug)]
struct ScoreSubmission {
    resume: ResumeUpload,
    job_url: String,
    job_text: Option<String>,
    candidate_name: String,
    candidate_email: String,
}

impl ScoreForm {
    fn validate(self) -> Result<ScoreSubmission, AppError> {
        let resume = self
            .resume
            .filter(|r| !r.data.is_empty())
            .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
        let job_url = required(self.job_url, "jobUrl")?;
        let candidate_name = required(self.candidate_name, "candidateName")?;
        let candidate_email = required(self.candidate_email, "candidateEmail")?;

        if !is_plausible_email(&candidate_email) {
            return Err(AppError::Validation(format!(
                "candidateEmail '{candidate_email}' is not a valid email address"
            )));
        }

        Ok(ScoreSubmission {
            resume,
            job_url,
            job_text: self.job_text.filter(|t| !t.trim().is_empty()),
            candidate_name,
            candidate_email,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} cannot be empty")))
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {e}"))
}

async fn read_form(mut multipart: Multipart) -> Result<ScoreForm, AppError> {
    let mut form = ScoreForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                form.resume = Some(ResumeUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            "jobUrl" => form.job_url = Some(field.text().await.map_err(multipart_error)?),
            "jobText" => form.job_text = Some(field.text().await.map_err(multipart_error)?),
            "candidateName" => {
                form.candidate_name = Some(field.text().await.map_err(multipart_error)?)
            }
            "candidateEmail" => {
                form.candidate_email = Some(field.text().await.map_err(multipart_error)?)
            }
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/score
///
/// Multipart: resume file + jobUrl, optional jobText, candidateName, candidateEmail.
/// A non-blank jobText wins over fetching jobUrl. The result is stored before
/// the response is sent.
pub async fn handle_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScoreResponse>, AppError> {
    let submission = read_form(multipart).await?.validate()?;

    let resume_text = extract_resume_text(submission.resume).await?;
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract any text from the resume.".to_string(),
        ));
    }

    let job_text = match submission.job_text {
        Some(text) => text,
        None => state.job_fetcher.fetch_job_description(&submission.job_url).await,
    };
    if job_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not fetch job description from the URL and no jobText was provided."
                .to_string(),
        ));
    }

    info!("Scoring candidate against {}", submission.job_url);
    let result = state
        .scorer
        .score(&ScoreRequest {
            resume_text,
            job_text,
        })
        .await?;

    let record = ScoreRecord::new(
        submission.candidate_name,
        submission.candidate_email,
        submission.job_url,
        &result,
    );
    state.store.insert_score(&record).await?;

    Ok(Json(ScoreResponse::from(result)))
}
