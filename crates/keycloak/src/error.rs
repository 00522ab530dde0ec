use warden_auth::LoginError;

/// Errors raised while talking to Keycloak.
///
/// Every variant maps onto an HTTP status class through
/// [`LoginError::code`]: caller mistakes are 4xx, anything on Keycloak's or
/// the network's side is 5xx.
#[derive(Debug, thiserror::Error)]
pub enum KeycloakError {
    /// OTP is mandatory for this realm and none (or a malformed one) was given.
    #[error("invalid OTP")]
    InvalidOtp,

    /// Keycloak rejected the username/password (or OTP) combination.
    #[error("invalid user credentials")]
    InvalidCredentials,

    /// The token is expired, revoked or unknown to the realm.
    #[error("token is not active")]
    InactiveToken,

    /// Keycloak refused the configured client (bad client id or secret).
    #[error("client rejected by Keycloak: {0}")]
    ClientRejected(String),

    /// The HTTP request failed (connection refused, timeout, TLS, ...).
    #[error("HTTP request to Keycloak failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Keycloak answered with a status this client does not expect.
    #[error("unexpected Keycloak response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("failed to parse Keycloak response: {0}")]
    ParseError(String),
}

impl LoginError for KeycloakError {
    fn code(&self) -> u16 {
        match self {
            KeycloakError::InvalidOtp => 400,
            KeycloakError::InvalidCredentials | KeycloakError::InactiveToken => 401,
            KeycloakError::HttpRequest(e) if e.is_timeout() => 504,
            KeycloakError::HttpRequest(_)
            | KeycloakError::ClientRejected(_)
            | KeycloakError::UnexpectedResponse { .. } => 502,
            KeycloakError::ParseError(_) => 500,
        }
    }
}
