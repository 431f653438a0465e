//! Structural key aliasing.
//!
//! Well-known product field names are replaced by one-letter aliases to keep
//! tokens short. Only object *keys* are rewritten, by walking the parsed value;
//! string contents are never inspected, so a description containing
//! `"price":` survives untouched.
//!
//! Keys that already look like an alias (or start with the escape marker) are
//! escaped with a leading `~`, which keeps the mapping injective: any JSON value
//! round-trips exactly, whatever its keys are.

use serde_json::{Map, Value};

/// `(long, short)` pairs. Order is irrelevant; both columns are unique.
pub const KEY_ALIASES: [(&str, &str); 7] = [
    ("id", "i"),
    ("icon", "c"),
    ("title", "t"),
    ("subtitle", "s"),
    ("description", "d"),
    ("price", "p"),
    ("link", "l"),
];

const ESCAPE: char = '~';

fn alias_of(key: &str) -> Option<&'static str> {
    KEY_ALIASES
        .iter()
        .find(|(long, _)| *long == key)
        .map(|(_, short)| *short)
}

fn long_of(key: &str) -> Option<&'static str> {
    KEY_ALIASES
        .iter()
        .find(|(_, short)| *short == key)
        .map(|(long, _)| *long)
}

fn shorten_key(key: String) -> String {
    if let Some(short) = alias_of(&key) {
        return short.to_string();
    }
    if long_of(&key).is_some() || key.starts_with(ESCAPE) {
        let mut escaped = String::with_capacity(key.len() + 1);
        escaped.push(ESCAPE);
        escaped.push_str(&key);
        return escaped;
    }
    key
}

fn expand_key(key: String) -> String {
    if let Some(rest) = key.strip_prefix(ESCAPE) {
        return rest.to_string();
    }
    match long_of(&key) {
        Some(long) => long.to_string(),
        None => key,
    }
}

fn map_keys(value: Value, f: &impl Fn(String) -> String) -> Value {
    match value {
        Value::Object(obj) => {
            let mut out = Map::with_capacity(obj.len());
            for (k, v) in obj {
                out.insert(f(k), map_keys(v, f));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(|v| map_keys(v, f)).collect()),
        other => other,
    }
}

/// Replace well-known keys by their aliases, recursively.
pub fn shorten_keys(value: Value) -> Value {
    map_keys(value, &shorten_key)
}

/// Inverse of [`shorten_keys`].
///
/// Values that were never shortened (long keys, no escape markers) pass
/// through unchanged, which keeps older tokens readable.
pub fn expand_keys(value: Value) -> Value {
    map_keys(value, &expand_key)
}
