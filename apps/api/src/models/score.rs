use serde::Serialize;

use crate::scoring::decode::ScoreResult;

/// One scored candidate, as forwarded to the score store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_url: String,
    pub score: f64,
    /// Exact JSON text the score was decoded from.
    pub raw_json: String,
    pub explanation: String,
}

impl ScoreRecord {
    pub fn new(
        candidate_name: String,
        candidate_email: String,
        job_url: String,
        result: &ScoreResult,
    ) -> Self {
        Self {
            candidate_name,
            candidate_email,
            job_url,
            score: result.score,
            raw_json: result.raw_json.clone(),
            explanation: result.explanation.clone(),
        }
    }
}
