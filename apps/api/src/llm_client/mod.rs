//! LLM Client — the single point of entry for all generation calls in talentmatch.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! Everything above this module talks to the `Generator` trait, so the scoring
//! pipeline can be driven by a scripted fake in tests.
//!
//! One request per `generate` call. Transport failures are returned as-is;
//! deciding whether to try again is the caller's business.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Missing LLM credential: {0}")]
    MissingCredential(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unreadable response envelope: {0}")]
    Envelope(#[from] serde_json::Error),
}

/// Prompt for a single generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPrompt {
    pub text: String,
    /// Ask the provider for JSON-typed output with fixed sampling parameters.
    pub force_structured_output: bool,
}

impl GenerationPrompt {
    pub fn structured(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            force_structured_output: true,
        }
    }
}

/// Best-effort text pulled out of the provider envelope. May be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGenerationResponse {
    pub text: String,
}

/// A text-generation backend. Carried by the scoring pipeline as `Arc<dyn Generator>`.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &GenerationPrompt)
        -> Result<RawGenerationResponse, GenerationError>;
}

/// Sampling parameters sent alongside structured-output requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.9,
            top_k: 40,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: &'static str,
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "topK")]
    top_k: u32,
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    sampling: SamplingParams,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingCredential(
                "API key is blank".to_string(),
            ));
        }

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
            sampling: SamplingParams::default(),
        })
    }

    /// Builds the client from configuration. Fails before any call is made when
    /// no credential is configured.
    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        let api_key = config.llm_api_key.clone().ok_or_else(|| {
            GenerationError::MissingCredential(
                "set LLM_API_KEY or GOOGLE_API_KEY".to_string(),
            )
        })?;

        let client = Self::new(
            api_key,
            config.llm_base_url.clone(),
            config.llm_model.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        )?;

        Ok(client.with_sampling(SamplingParams {
            temperature: config.llm_temperature,
            top_p: config.llm_top_p,
            top_k: config.llm_top_k,
        }))
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request<'a>(&self, prompt: &'a GenerationPrompt) -> GenerateContentRequest<'a> {
        let generation_config = prompt.force_structured_output.then(|| GenerationConfig {
            response_mime_type: JSON_MIME_TYPE,
            temperature: self.sampling.temperature,
            top_p: self.sampling.top_p,
            top_k: self.sampling.top_k,
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: &prompt.text }],
            }],
            generation_config,
        }
    }

    fn classify(&self, error: reqwest::Error) -> GenerationError {
        if error.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Http(error)
        }
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(
        &self,
        prompt: &GenerationPrompt,
    ) -> Result<RawGenerationResponse, GenerationError> {
        let request_body = self.build_request(prompt);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let envelope: Value = serde_json::from_str(&body)?;
        let text = first_candidate_text(&envelope);

        debug!(
            "Gemini call succeeded: model={}, structured={}, response_chars={}",
            self.model,
            prompt.force_structured_output,
            text.chars().count()
        );

        Ok(RawGenerationResponse { text })
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a response envelope.
///
/// A missing or blank `text` falls back to the serialized part itself. That
/// part is a JSON object, so it decodes on the first attempt with every field
/// defaulted (score 0). No part at all yields an empty string.
fn first_candidate_text(envelope: &Value) -> String {
    let Some(part) = envelope.pointer("/candidates/0/content/parts/0") else {
        return String::new();
    };

    match part.get("text").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => part.to_string().trim().to_string(),
    }
}

/// Prefers `error.message` from a Google API error body, else the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.to_string())
}
