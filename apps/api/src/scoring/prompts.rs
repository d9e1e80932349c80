// All LLM prompt text for the scoring pipeline.

use crate::scoring::text::{truncate, PROMPT_SEGMENT_CHARS};

/// The response shape both prompts ask for.
pub const SCORE_SCHEMA: &str = "{ \"score\": <float 0-100>, \
    \"subscores\": { \"skills\": <float>, \"experience\": <float>, \"education\": <float>, \"keywordsCoverage\": <float> }, \
    \"explanation\": <string> }";

/// Primary scoring prompt. Both inputs are capped at `PROMPT_SEGMENT_CHARS`.
pub fn build_scoring_prompt(job_text: &str, resume_text: &str) -> String {
    format!(
        "JOB DESCRIPTION:\n{job}\n\n\
         RESUME:\n{resume}\n\n\
         Return ONLY one JSON object (no markdown, no code fences) with EXACT schema:\n\
         {SCORE_SCHEMA}",
        job = truncate(job_text, PROMPT_SEGMENT_CHARS),
        resume = truncate(resume_text, PROMPT_SEGMENT_CHARS),
    )
}

/// Asks the model to reformat its own non-conforming output.
/// Embeds `first_response` in full.
pub fn build_repair_prompt(first_response: &str) -> String {
    format!(
        "Convert the following content into VALID JSON ONLY that matches this exact schema:\n\
         {SCORE_SCHEMA}\n\
         Do not include any extra text, comments, or code fences.\n\n\
         CONTENT:\n{first_response}"
    )
}
