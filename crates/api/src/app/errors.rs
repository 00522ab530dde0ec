use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use warden_auth::LoginError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Map a provider login failure onto the response the caller sees.
///
/// The status is the error's own code; the body carries a generic code only,
/// never provider detail.
pub fn login_error_to_response(err: &dyn LoginError) -> axum::response::Response {
    let status = StatusCode::from_u16(err.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let (code, message) = match status {
        StatusCode::BAD_REQUEST => ("invalid_request", "invalid login request"),
        StatusCode::UNAUTHORIZED => ("invalid_credentials", "invalid credentials"),
        s if s.is_server_error() => ("provider_error", "identity provider unavailable"),
        _ => ("login_failed", "login failed"),
    };
    json_error(status, code, message)
}

pub fn unknown_organization() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "unknown_organization", "unknown organization")
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::to_bytes;

    #[derive(Debug, thiserror::Error)]
    #[error("upstream said: realm disabled")]
    struct Upstream(u16);

    impl LoginError for Upstream {
        fn code(&self) -> u16 {
            self.0
        }
    }

    #[tokio::test]
    async fn login_error_uses_its_code_without_detail() {
        let res = login_error_to_response(&Upstream(502));
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(res.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "provider_error");
        assert!(!body.to_string().contains("realm disabled"));
    }

    #[test]
    fn out_of_range_code_is_internal_error() {
        let res = login_error_to_response(&Upstream(42));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(login_error_to_response(&Upstream(400)).status(), StatusCode::BAD_REQUEST);
        assert_eq!(login_error_to_response(&Upstream(401)).status(), StatusCode::UNAUTHORIZED);
    }
}
