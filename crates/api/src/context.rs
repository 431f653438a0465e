/// Admin identity for a request that passed the gate.
///
/// Present on every request under `/admin`; absent everywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    user: String,
}

impl AdminContext {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}
