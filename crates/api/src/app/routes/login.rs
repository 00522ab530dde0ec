use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app::{
    dto::{LoginRequest, LoginResponse},
    errors::{json_error, login_error_to_response, unknown_organization},
    services::AppServices,
};
use crate::context::extract_org;

/// `POST /login`: exchange credentials for a session with the organization's
/// identity provider.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Some(provider) = extract_org(&headers).and_then(|org| services.providers.lookup(org))
    else {
        return unknown_organization();
    };

    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text());
        }
    };

    match provider
        .login(&req.username, &req.password, req.totp.as_deref())
        .await
    {
        Ok(user) => {
            tracing::info!(username = %user.user_info().username, "login succeeded");
            Json(LoginResponse::new(user.as_ref(), provider.ttl())).into_response()
        }
        Err(err) => {
            tracing::warn!(username = %req.username, code = err.code(), "login failed");
            login_error_to_response(err.as_ref())
        }
    }
}
