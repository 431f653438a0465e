//! Token encode/decode.
//!
//! Layout: `base64url_nopad(utf8(json(shorten_keys(value))))`.
//!
//! Older tokens were `base64(percent_encode(json(value)))` with long keys; the
//! decoder still accepts them.

use base64::{Engine, engine::general_purpose};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CodecError;
use crate::keys::{expand_keys, shorten_keys};

/// Upper bound on accepted token length (bytes).
pub const MAX_TOKEN_LEN: usize = 256 * 1024;

/// Encode a JSON value into a URL-safe token (`[A-Za-z0-9_-]*`).
pub fn encode_value(value: &Value) -> String {
    let json = shorten_keys(value.clone()).to_string();
    let b64 = general_purpose::STANDARD.encode(json.as_bytes());
    b64.chars()
        .filter_map(|ch| match ch {
            '+' => Some('-'),
            '/' => Some('_'),
            '=' => None,
            other => Some(other),
        })
        .collect()
}

/// Encode any serializable value.
///
/// Fails only when the value has no JSON representation (e.g. a map with
/// non-string keys).
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    let value = serde_json::to_value(value).map_err(CodecError::Serialize)?;
    Ok(encode_value(&value))
}

/// Decode a token, reporting why it was rejected.
pub fn try_decode_value(token: &str) -> Result<Value, CodecError> {
    if token.is_empty() {
        return Err(CodecError::Empty);
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(CodecError::TooLong { len: token.len() });
    }

    let mut b64: String = token
        .trim_end_matches('=')
        .chars()
        .map(|ch| match ch {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let rem = b64.len() % 4;
    if rem != 0 {
        b64.extend(std::iter::repeat_n('=', 4 - rem));
    }

    let bytes = general_purpose::STANDARD.decode(b64.as_bytes())?;
    let text = String::from_utf8(bytes)?;

    match serde_json::from_str::<Value>(&text) {
        Ok(v) => Ok(expand_keys(v)),
        Err(err) => parse_legacy(&text).ok_or(CodecError::Json(err)),
    }
}

/// Older tokens percent-encoded the JSON text before base64. They always
/// carried full key names, so no alias expansion applies.
fn parse_legacy(text: &str) -> Option<Value> {
    if !text.contains('%') {
        return None;
    }
    let decoded = percent_decode_str(text).decode_utf8().ok()?;
    serde_json::from_str(&decoded).ok()
}

/// Decode a token; malformed input yields `None`.
pub fn decode_value(token: &str) -> Option<Value> {
    match try_decode_value(token) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(error = %e, token_len = token.len(), "discarding malformed token");
            None
        }
    }
}

/// Decode a token straight into a typed value.
///
/// A token that decodes to JSON of the wrong shape is treated like a malformed
/// one.
pub fn decode<T: DeserializeOwned>(token: &str) -> Option<T> {
    let value = decode_value(token)?;
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(error = %e, "token payload has unexpected shape");
            None
        }
    }
}
