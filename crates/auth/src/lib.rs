//! `fimenu-auth` — admin access gate (HTTP Basic), decoupled from HTTP and storage.
//!
//! The API layer feeds it the request path and `Authorization` header and maps
//! the returned [`GateDecision`] to a response.

pub mod basic;
pub mod gate;

pub use basic::{AdminCredentials, BasicAuthError, BasicCredentials};
pub use gate::{AdminGate, GateDecision, ADMIN_PREFIX, CHALLENGE};
