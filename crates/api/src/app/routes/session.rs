use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app::{
    dto::SessionResponse,
    errors::{json_error, login_error_to_response, unknown_organization},
    services::AppServices,
};
use crate::context::{extract_bearer, extract_org};

/// `GET /session`: roles the caller's bearer token grants in its organization.
pub async fn session(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> Response {
    let Some((org, provider)) = extract_org(&headers)
        .and_then(|org| services.providers.lookup(org).map(|p| (org, p)))
    else {
        return unknown_organization();
    };
    let Some(token) = extract_bearer(&headers) else {
        return json_error(StatusCode::UNAUTHORIZED, "missing_token", "missing bearer token");
    };

    match provider.validate(token).await {
        Ok(roles) => Json(SessionResponse {
            organization: org.to_owned(),
            roles: roles.iter().map(|r| r.as_str().to_owned()).collect(),
        })
        .into_response(),
        Err(err) => login_error_to_response(err.as_ref()),
    }
}
