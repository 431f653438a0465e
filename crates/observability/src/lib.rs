//! Tracing/logging setup shared by binaries and tests.

/// Initialize process-wide logging (format from `FIMENU_LOG_FORMAT`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, layers).
pub mod tracing;
