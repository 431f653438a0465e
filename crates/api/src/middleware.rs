use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};

use fimenu_auth::{AdminGate, CHALLENGE, GateDecision};

use crate::app::errors;
use crate::context::AdminContext;

#[derive(Clone)]
pub struct GateState {
    pub gate: Arc<AdminGate>,
}

/// Edge gate: HTTP Basic on the admin prefix, everything else passes through.
pub async fn admin_gate_middleware(
    State(state): State<GateState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let decision = state.gate.check(&path, authorization(req.headers()));

    match decision {
        GateDecision::Pass => next.run(req).await,
        GateDecision::Allow => {
            let user = state.gate.admin_user().unwrap_or_default().to_string();
            req.extensions_mut().insert(AdminContext::new(user));
            next.run(req).await
        }
        GateDecision::NotConfigured => {
            tracing::warn!(%path, "admin request rejected: ADMIN_USER/ADMIN_PASS not configured");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "admin_auth_not_configured",
                "Admin auth not configured. Set ADMIN_USER and ADMIN_PASS.",
            )
        }
        GateDecision::Unauthorized => {
            tracing::warn!(%path, "admin request rejected: missing or invalid credentials");
            unauthorized()
        }
    }
}

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

fn unauthorized() -> Response {
    let mut res = errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized");
    res.headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    res
}
