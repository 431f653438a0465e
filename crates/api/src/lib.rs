//! HTTP API: customer menu, admin editing, and the admin access gate.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
