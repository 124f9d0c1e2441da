//! Lenient field decoders for model output.
//!
//! Model replies drift from the requested template: numbers arrive as
//! strings, lists arrive as `null`, enums arrive in mixed case. Every
//! decoder here accepts any JSON value and falls back to the field's
//! default instead of failing the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Enums decoded from free-form labels such as `"High"` or `"proceed with caution"`
pub(crate) trait Label: Sized + Default {
    fn from_label(label: &str) -> Option<Self>;
}

/// Uppercase and join words with underscores: `"proceed with caution"` -> `"PROCEED_WITH_CAUTION"`
pub(crate) fn normalize_label(label: &str) -> String {
    label
        .trim()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub(crate) fn label<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Label,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => T::from_label(&normalize_label(&s)).unwrap_or_default(),
        _ => T::default(),
    })
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(value).unwrap_or_default())
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

fn value_to_percent(value: Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, 100.0) as u8)
}

/// An integer percentage clamped to 0..=100
pub(crate) fn percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_percent(value).unwrap_or(0))
}

pub(crate) fn optional_percent<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_percent(value))
}

/// Finding records that can stand in for a bare scalar list entry
pub(crate) trait Finding: DeserializeOwned + Default {
    /// A record whose headline field holds `text`
    fn from_text(text: String) -> Self;
}

fn finding<T: Finding>(item: Value) -> T {
    match item {
        Value::Object(_) => serde_json::from_value(item).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "list entry did not decode, keeping defaults");
            T::default()
        }),
        other => value_to_text(other).map(T::from_text).unwrap_or_default(),
    }
}

/// A list of finding records; anything that is not an array is empty.
///
/// Every array element yields one record, so counts match what the model
/// returned. Scalars fill the record's headline field; `null` and nested
/// arrays become default records.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Finding,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().map(finding).collect(),
        _ => Vec::new(),
    })
}

/// A list of strings; scalar entries are stringified, the rest dropped
pub(crate) fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(value_to_text).collect(),
        _ => Vec::new(),
    })
}
