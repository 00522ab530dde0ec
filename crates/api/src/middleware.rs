//! The authorization gate: an axum middleware wrapping protected routes.
//!
//! Per request: public match → pass through; otherwise consult
//! [`Constraints::authorization_path`] and either pass through or answer with
//! a bare status (403, 401, 404 or 502). The request body is never read here,
//! so the wrapped handler sees the request exactly as the client sent it.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use warden_auth::{AuthorizationError, Constraints, Method};

use crate::context::{extract_bearer, extract_org};

#[derive(Clone)]
pub struct AuthState {
    pub constraints: Arc<dyn Constraints>,
}

/// Wrap `router` with the gate.
pub fn with_gate<S>(router: Router<S>, constraints: Arc<dyn Constraints>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(axum::middleware::from_fn_with_state(
        AuthState { constraints },
        authorization_middleware,
    ))
}

pub async fn authorization_middleware(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();
    let method = Method::new(req.method().as_str());

    if state.constraints.validate_public_constraints(&path, &method) {
        tracing::debug!(%path, %method, "public route");
        return next.run(req).await;
    }

    let decision = {
        let token = extract_bearer(req.headers()).unwrap_or_default();
        let org = extract_org(req.headers()).unwrap_or_default();
        state
            .constraints
            .authorization_path(token, &path, &method, org)
            .await
    };

    match decision {
        Ok(true) => next.run(req).await,
        Ok(false) => {
            tracing::warn!(%path, %method, "request forbidden");
            StatusCode::FORBIDDEN.into_response()
        }
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                tracing::error!(%path, %method, error = %err, "authorization check failed");
            } else {
                tracing::warn!(%path, %method, error = %err, "request rejected");
            }
            status.into_response()
        }
    }
}

/// Response status for an undecidable authorization.
pub fn status_for(err: &AuthorizationError) -> StatusCode {
    match err {
        AuthorizationError::UnknownOrganization(_) => StatusCode::NOT_FOUND,
        AuthorizationError::MissingToken | AuthorizationError::InvalidToken(_) => {
            StatusCode::UNAUTHORIZED
        }
        AuthorizationError::Provider { .. } => StatusCode::BAD_GATEWAY,
    }
}
