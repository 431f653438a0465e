use axum::Router;

pub mod admin;
pub mod customer;
pub mod system;

/// Router for every application endpoint except `/health`.
///
/// The admin gate is applied on top of this by `build_app`; handlers under
/// `/admin` can rely on an `AdminContext` extension.
pub fn router() -> Router {
    Router::new()
        .nest("/customer", customer::router())
        .nest("/admin", admin::router())
}
