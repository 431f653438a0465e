//! Per-field coercion of loosely-typed JSON.

use serde_json::Value;

/// Text form of a scalar, the way a form field would display it.
///
/// `null`/missing is `None` so callers can substitute their own fallback.
/// Containers are rendered as compact JSON.
pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Like [`text`], with a fallback for `null`/missing.
pub(crate) fn text_or(value: Option<&Value>, fallback: &str) -> String {
    text(value).unwrap_or_else(|| fallback.to_string())
}

/// Only genuine strings survive.
pub(crate) fn string_only(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
