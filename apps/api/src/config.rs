use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Blank values count as unset.
#[derive(Debug, Clone)]
pub struct Config {
    /// `LLM_API_KEY`, falling back to `GOOGLE_API_KEY`. Checked when the
    /// generation client is built.
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub llm_base_url: String,
    pub llm_timeout_secs: u64,
    /// Sampling parameters for structured-output calls.
    pub llm_temperature: f32,
    pub llm_top_p: f32,
    pub llm_top_k: u32,
    pub job_fetch_timeout_secs: u64,
    /// Persistence is disabled when unset.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            llm_api_key: first_non_blank(&[
                optional_env("LLM_API_KEY"),
                optional_env("GOOGLE_API_KEY"),
            ]),
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_base_url: optional_env("LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 30)?,
            llm_temperature: parse_env("LLM_TEMPERATURE", 0.2)?,
            llm_top_p: parse_env("LLM_TOP_P", 0.9)?,
            llm_top_k: parse_env("LLM_TOP_K", 40)?,
            job_fetch_timeout_secs: parse_env("JOB_FETCH_TIMEOUT_SECS", 15)?,
            database_url: optional_env("DATABASE_URL"),
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn first_non_blank(candidates: &[Option<String>]) -> Option<String> {
    candidates.iter().flatten().find(|v| !v.trim().is_empty()).cloned()
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid number, got '{raw}'"))
}
