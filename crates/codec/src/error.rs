use thiserror::Error;

/// Why a token could not be produced or read back.
///
/// Callers normally only see `Option` (see [`crate::decode_value`]); the
/// detailed reason exists for logs and tests.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("empty token")]
    Empty,

    #[error("token too long ({len} bytes)")]
    TooLong { len: usize },

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("token payload is not JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("value cannot be represented as JSON: {0}")]
    Serialize(#[source] serde_json::Error),
}
