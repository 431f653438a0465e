//! Runtime configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use fimenu_auth::AdminCredentials;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FIMENU_BIND is not a socket address: {0}")]
    Bind(#[from] std::net::AddrParseError),

    #[error("FIMENU_PUBLIC_URL is not a URL: {0}")]
    PublicUrl(#[from] url::ParseError),

    #[error("FIMENU_PUBLIC_URL must be http or https, got '{0}'")]
    PublicUrlScheme(String),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address (`FIMENU_BIND`).
    pub bind: SocketAddr,
    /// Origin used when building share links (`FIMENU_PUBLIC_URL`).
    pub public_url: Url,
    /// JSON file backing the local store (`FIMENU_STORE_PATH`); in-memory when unset.
    pub store_path: Option<PathBuf>,
    /// Admin gate secrets (`ADMIN_USER` / `ADMIN_PASS`). `None` means the gate
    /// rejects every admin request.
    pub admin: Option<AdminCredentials>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = non_empty("FIMENU_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse()?;

        let public_url = Url::parse(
            &non_empty("FIMENU_PUBLIC_URL").unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
        )?;
        if !matches!(public_url.scheme(), "http" | "https") {
            return Err(ConfigError::PublicUrlScheme(public_url.scheme().to_string()));
        }

        Ok(Self {
            bind,
            public_url,
            store_path: non_empty("FIMENU_STORE_PATH").map(PathBuf::from),
            admin: AdminCredentials::new(lookup("ADMIN_USER"), lookup("ADMIN_PASS")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind.to_string(), DEFAULT_BIND);
        assert_eq!(cfg.public_url.as_str(), "http://localhost:8080/");
        assert!(cfg.store_path.is_none());
        assert!(cfg.admin.is_none());
    }

    #[test]
    fn admin_requires_both_secrets() {
        let cfg = ApiConfig::from_lookup(lookup(&[("ADMIN_USER", "dealer")])).unwrap();
        assert!(cfg.admin.is_none());

        let cfg = ApiConfig::from_lookup(lookup(&[("ADMIN_USER", "dealer"), ("ADMIN_PASS", "pw")])).unwrap();
        assert_eq!(cfg.admin.unwrap().user(), "dealer");
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("FIMENU_BIND", "nope")])),
            Err(ConfigError::Bind(_))
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("FIMENU_PUBLIC_URL", "not a url")])),
            Err(ConfigError::PublicUrl(_))
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("FIMENU_PUBLIC_URL", "ftp://x.test")])),
            Err(ConfigError::PublicUrlScheme(_))
        ));
    }
}
