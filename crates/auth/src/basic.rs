//! HTTP Basic credential parsing and verification.

use base64::{Engine, engine::general_purpose};
use subtle::ConstantTimeEq;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BasicAuthError {
    #[error("authorization scheme is not Basic")]
    WrongScheme,

    #[error("credentials are not valid base64")]
    Encoding,

    #[error("credentials are not UTF-8")]
    NotUtf8,

    #[error("credentials lack a ':' separator")]
    MissingSeparator,
}

/// `user:pass` pair presented by a client.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub user: String,
    pub pass: String,
}

impl core::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

impl BasicCredentials {
    /// Parse an `Authorization` header value (`Basic <base64(user:pass)>`).
    ///
    /// The password may itself contain `:`; only the first one separates.
    pub fn parse_header(header: &str) -> Result<Self, BasicAuthError> {
        let (scheme, encoded) = header
            .trim()
            .split_once(' ')
            .ok_or(BasicAuthError::WrongScheme)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(BasicAuthError::WrongScheme);
        }

        let raw = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|_| BasicAuthError::Encoding)?;
        let decoded = String::from_utf8(raw).map_err(|_| BasicAuthError::NotUtf8)?;
        let (user, pass) = decoded
            .split_once(':')
            .ok_or(BasicAuthError::MissingSeparator)?;

        Ok(Self {
            user: user.to_string(),
            pass: pass.to_string(),
        })
    }

    /// Header value a client would send for these credentials.
    pub fn to_header(&self) -> String {
        let raw = format!("{}:{}", self.user, self.pass);
        format!("Basic {}", general_purpose::STANDARD.encode(raw))
    }
}

/// The configured admin secret pair.
///
/// Only constructible from two non-empty values; a half-configured deployment
/// has no credentials at all.
#[derive(Clone)]
pub struct AdminCredentials {
    user: String,
    pass: String,
}

impl core::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

impl AdminCredentials {
    pub fn new(user: Option<String>, pass: Option<String>) -> Option<Self> {
        let user = user.filter(|u| !u.is_empty())?;
        let pass = pass.filter(|p| !p.is_empty())?;
        Some(Self { user, pass })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Constant-time comparison of both fields.
    pub fn verify(&self, presented: &BasicCredentials) -> bool {
        let user_ok = self.user.as_bytes().ct_eq(presented.user.as_bytes());
        let pass_ok = self.pass.as_bytes().ct_eq(presented.pass.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}
