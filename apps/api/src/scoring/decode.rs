//! Maps an extracted JSON object onto `ScoreResult`.
//!
//! Field handling is deliberately permissive: providers return numbers as
//! strings, drop fields, or invent extra sub-categories. Only text that is not
//! a JSON object at all is rejected.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    MalformedJson(String),
}

/// Final structured output of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Expected 0–100; not enforced.
    pub score: f64,
    /// Keys are whatever the provider returned, not a fixed set.
    pub subscores: BTreeMap<String, f64>,
    pub explanation: String,
    /// The exact JSON text that was decoded, kept for persistence.
    #[serde(skip)]
    pub raw_json: String,
}

pub fn decode(json_text: &str) -> Result<ScoreResult, DecodeError> {
    let value: Value =
        serde_json::from_str(json_text).map_err(|e| DecodeError::MalformedJson(e.to_string()))?;

    let Value::Object(object) = value else {
        return Err(DecodeError::MalformedJson(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    Ok(ScoreResult {
        score: coerce_f64(object.get("score")),
        subscores: decode_subscores(&object),
        explanation: coerce_text(object.get("explanation")),
        raw_json: json_text.to_string(),
    })
}

fn decode_subscores(object: &Map<String, Value>) -> BTreeMap<String, f64> {
    match object.get("subscores") {
        Some(Value::Object(subs)) => subs
            .iter()
            .map(|(category, value)| (category.clone(), coerce_f64(Some(value))))
            .collect(),
        _ => BTreeMap::new(),
    }
}

/// Numbers pass through, numeric strings are parsed, booleans map to 1/0.
/// Everything else, including non-finite results, becomes 0.
fn coerce_f64(value: Option<&Value>) -> f64 {
    let coerced = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    coerced.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
