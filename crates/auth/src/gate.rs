//! Path-prefix access gate.

use crate::basic::{AdminCredentials, BasicCredentials};

/// Paths under this prefix require admin credentials.
pub const ADMIN_PREFIX: &str = "/admin";

/// `WWW-Authenticate` challenge sent with a 401.
pub const CHALLENGE: &str = r#"Basic realm="Admin Area", charset="UTF-8""#;

/// Outcome of checking one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Path is outside the protected prefix.
    Pass,
    /// Protected path, valid credentials.
    Allow,
    /// Protected path, but no secrets are configured: fail closed.
    NotConfigured,
    /// Protected path, credentials missing or wrong.
    Unauthorized,
}

impl GateDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, GateDecision::Pass | GateDecision::Allow)
    }
}

#[derive(Debug, Clone)]
pub struct AdminGate {
    credentials: Option<AdminCredentials>,
}

impl AdminGate {
    pub fn new(credentials: Option<AdminCredentials>) -> Self {
        Self { credentials }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Configured admin user name, if the gate is configured.
    pub fn admin_user(&self) -> Option<&str> {
        self.credentials.as_ref().map(AdminCredentials::user)
    }

    /// Decide whether a request may proceed.
    pub fn check(&self, path: &str, authorization: Option<&str>) -> GateDecision {
        if !is_protected(path) {
            return GateDecision::Pass;
        }

        let Some(expected) = &self.credentials else {
            return GateDecision::NotConfigured;
        };

        let presented = match authorization.map(BasicCredentials::parse_header) {
            Some(Ok(c)) => c,
            Some(Err(e)) => {
                tracing::debug!(error = %e, "unusable admin authorization header");
                return GateDecision::Unauthorized;
            }
            None => return GateDecision::Unauthorized,
        };

        if expected.verify(&presented) {
            GateDecision::Allow
        } else {
            GateDecision::Unauthorized
        }
    }
}

/// `/admin` and everything below it, but not `/administrator`.
fn is_protected(path: &str) -> bool {
    match path.strip_prefix(ADMIN_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AdminGate {
        AdminGate::new(AdminCredentials::new(Some("admin".into()), Some("pw".into())))
    }

    fn header(user: &str, pass: &str) -> String {
        BasicCredentials {
            user: user.into(),
            pass: pass.into(),
        }
        .to_header()
    }

    #[test]
    fn public_paths_pass_unchecked() {
        assert_eq!(gate().check("/customer", None), GateDecision::Pass);
        assert_eq!(gate().check("/administrator", None), GateDecision::Pass);
        assert_eq!(AdminGate::new(None).check("/health", None), GateDecision::Pass);
    }

    #[test]
    fn unconfigured_gate_fails_closed() {
        let gate = AdminGate::new(None);
        assert_eq!(gate.check("/admin", None), GateDecision::NotConfigured);
        assert_eq!(
            gate.check("/admin/products", Some(&header("admin", "pw"))),
            GateDecision::NotConfigured
        );
        assert!(!gate.check("/admin", None).is_allowed());
    }

    #[test]
    fn missing_or_wrong_credentials_are_unauthorized() {
        assert_eq!(gate().check("/admin/products", None), GateDecision::Unauthorized);
        assert_eq!(
            gate().check("/admin/products", Some(&header("admin", "nope"))),
            GateDecision::Unauthorized
        );
        assert_eq!(
            gate().check("/admin/products", Some("Basic %%%")),
            GateDecision::Unauthorized
        );
    }

    #[test]
    fn valid_credentials_are_allowed() {
        assert_eq!(
            gate().check("/admin/products", Some(&header("admin", "pw"))),
            GateDecision::Allow
        );
    }
}
