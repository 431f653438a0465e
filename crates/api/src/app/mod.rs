//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: working catalog, package list and the local store
//! - `routes/`: HTTP routes + handlers (customer menu, admin editing)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use fimenu_auth::AdminGate;
use fimenu_infra::{InMemoryLocalStore, JsonFileStore, LocalStore, StoreError};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Opens the JSON file store when `store_path` is configured, otherwise keeps
/// saved state in memory for the life of the process.
pub fn build_app(config: &ApiConfig) -> Result<Router, StoreError> {
    let store: Arc<dyn LocalStore> = match &config.store_path {
        Some(path) => {
            let store = JsonFileStore::open(path.clone())?;
            tracing::info!(path = %path.display(), "using json file store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("FIMENU_STORE_PATH not set; saved state is lost on restart");
            Arc::new(InMemoryLocalStore::new())
        }
    };
    Ok(build_app_with_store(config, store))
}

/// Build the router over an already opened store.
pub fn build_app_with_store(config: &ApiConfig, store: Arc<dyn LocalStore>) -> Router {
    if config.admin.is_none() {
        tracing::warn!("ADMIN_USER/ADMIN_PASS not set; admin routes will refuse every request");
    }
    let gate_state = middleware::GateState {
        gate: Arc::new(AdminGate::new(config.admin.clone())),
    };

    let services = Arc::new(services::AppServices::new(store, config.public_url.clone()));

    // The gate wraps the whole router so it sees every path, including ones
    // that would otherwise 404.
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new().layer(axum::middleware::from_fn_with_state(
                gate_state,
                middleware::admin_gate_middleware,
            )),
        )
}
