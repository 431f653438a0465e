//! Customer-facing menu: resolve shared state, toggle selections.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use fimenu_catalog::share;
use fimenu_core::ProductId;

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_menu))
        .route("/toggle", post(toggle_selection))
}

/// GET /customer?products=..&selections=..
pub async fn get_menu(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::MenuQuery>,
) -> axum::response::Response {
    let state = services.resolve_menu(query.products.as_deref(), query.selections.as_deref());
    let view = dto::MenuView::new(&state, services.public_url());
    (StatusCode::OK, Json(view)).into_response()
}

/// POST /customer/toggle?products=..&selections=..  `{"id": "..."}`
///
/// Ids unknown to the catalog may be toggled too; they just never count
/// towards the total.
pub async fn toggle_selection(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::MenuQuery>,
    Json(body): Json<dto::ToggleRequest>,
) -> axum::response::Response {
    let id: ProductId = match body.id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut state = services.resolve_menu(query.products.as_deref(), query.selections.as_deref());
    let selected = state.selection.toggle(id.clone());
    let total = state.total();
    let customer_url = share::customer_menu_url(services.public_url(), &state.catalog, &state.selection);

    let view = dto::ToggleView {
        id: id.into_inner(),
        selected,
        selections: dto::selection_ids(&state.selection),
        selections_token: state.selection.to_token(),
        total,
        total_display: total.to_string(),
        customer_url: customer_url.to_string(),
    };
    (StatusCode::OK, Json(view)).into_response()
}
