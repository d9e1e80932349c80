//! Scoring Orchestrator — the two-attempt recovery protocol.
//!
//! Flow: scoring prompt → generate → strip fences → extract object → decode.
//! If nothing decodable comes back, one repair prompt embedding the full first
//! response is sent, and the same recovery runs on the second response.
//! A second failure is terminal; there is never a third call.
//!
//! Transport failures are fatal immediately. Only content-shape failures buy
//! the repair round trip.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{GenerationError, GenerationPrompt, Generator};
use crate::scoring::decode::{decode, DecodeError, ScoreResult};
use crate::scoring::extract::extract_first_object;
use crate::scoring::prompts::{build_repair_prompt, build_scoring_prompt};
use crate::scoring::text::{preview, strip_fences};

/// Inputs to one scoring run. Both texts are expected to be non-blank.
#[derive(Debug, Clone)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub job_text: String,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Model did not return a JSON object.")]
    NoStructuredOutput {
        first_preview: String,
        second_preview: String,
    },
}

/// Why a single response could not be turned into a `ScoreResult`.
#[derive(Debug, Error)]
pub enum AttemptFailure {
    #[error("no balanced JSON object found")]
    NoJsonObject,

    #[error(transparent)]
    Malformed(#[from] DecodeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Primary,
    Repair,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempt::Primary => write!(f, "primary"),
            Attempt::Repair => write!(f, "repair"),
        }
    }
}

/// Receives rejected model output. `preview` is already sanitized and capped.
pub trait DiagnosticsSink: Send + Sync {
    fn rejected_output(&self, attempt: Attempt, failure: &AttemptFailure, preview: &str);
}

/// Default sink: structured `warn!` events.
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn rejected_output(&self, attempt: Attempt, failure: &AttemptFailure, preview: &str) {
        warn!(%attempt, reason = %failure, "LLM output not usable: {preview}");
    }
}

/// Stateless; share one instance across requests behind an `Arc`.
pub struct ScoringOrchestrator {
    generator: Arc<dyn Generator>,
    sink: Arc<dyn DiagnosticsSink>,
}

impl ScoringOrchestrator {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self::with_sink(generator, Arc::new(TracingSink))
    }

    pub fn with_sink(generator: Arc<dyn Generator>, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self { generator, sink }
    }

    pub async fn score(&self, request: &ScoreRequest) -> Result<ScoreResult, PipelineError> {
        let prompt =
            GenerationPrompt::structured(build_scoring_prompt(&request.job_text, &request.resume_text));
        let first = self.generator.generate(&prompt).await?;

        let failure = match recover(&first.text) {
            Ok(result) => {
                info!("Scored {:.1}/100 on the primary attempt", result.score);
                return Ok(result);
            }
            Err(failure) => failure,
        };
        let first_preview = preview(&first.text);
        self.sink
            .rejected_output(Attempt::Primary, &failure, &first_preview);

        let repair = GenerationPrompt::structured(build_repair_prompt(&first.text));
        let second = self.generator.generate(&repair).await?;

        match recover(&second.text) {
            Ok(result) => {
                info!("Scored {:.1}/100 after a repair attempt", result.score);
                Ok(result)
            }
            Err(failure) => {
                let second_preview = preview(&second.text);
                self.sink
                    .rejected_output(Attempt::Repair, &failure, &second_preview);
                Err(PipelineError::NoStructuredOutput {
                    first_preview,
                    second_preview,
                })
            }
        }
    }
}

/// Strip, extract, decode — one response's worth of recovery.
fn recover(text: &str) -> Result<ScoreResult, AttemptFailure> {
    let object = extract_first_object(strip_fences(text)).ok_or(AttemptFailure::NoJsonObject)?;
    Ok(decode(object)?)
}
