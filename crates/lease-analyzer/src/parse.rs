//! Tolerant decoding of model replies
//!
//! Replies may wrap the JSON object in prose or markdown fences. The
//! decoder takes everything from the first `{` to the last `}` and decodes
//! that; only when the reply contains no such span is the whole reply
//! decoded. Braces inside the surrounding prose are not balanced against
//! the payload.

use crate::errors::{AnalysisError, Result};
use crate::record::AnalysisRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid"));

/// The span from the first `{` to the last `}`, if any
pub fn json_candidate(raw: &str) -> Option<&str> {
    JSON_OBJECT.find(raw).map(|m| m.as_str())
}

/// Decode a model reply into an [`AnalysisRecord`].
///
/// Fails with [`AnalysisError::MalformedResponse`] when the candidate text
/// is not valid JSON or is valid JSON but not an object.
pub fn parse_response(raw: &str) -> Result<AnalysisRecord> {
    let candidate = json_candidate(raw).unwrap_or(raw);

    let malformed = |reason: String| AnalysisError::MalformedResponse {
        reason,
        raw: raw.to_string(),
    };

    let value: Value = serde_json::from_str(candidate).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed(format!(
            "expected a JSON object, found {}",
            kind_of(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
