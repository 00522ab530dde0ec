use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;

use warden_auth::{
    IdentityProvider, LoginError, Provider, ProviderConfig, Role, TokenValidator, User,
};
use warden_core::{ConfigError, ConfigResult};

use crate::wire::{ErrorResponse, Introspection, TokenResponse};
use crate::{KeycloakConfig, KeycloakError, KeycloakUser, client};

/// Provider `type` under which this backend is registered.
pub const PROVIDER_TYPE: &str = "keycloak";

const OTP_LENGTH: usize = 6;

/// Keycloak-backed identity provider for one organization.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct KeycloakProvider {
    config: KeycloakConfig,
    http_client: reqwest::Client,
}

impl KeycloakProvider {
    /// Create a provider from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the HTTP client cannot be built (e.g. no TLS
    /// backend available).
    #[tracing::instrument(skip_all, name = "KeycloakProvider::new", fields(realm = %config.realm))]
    pub fn new(config: KeycloakConfig) -> ConfigResult<Self> {
        let http_client = client::new_client_with_timeout(config.timeout)
            .map_err(|e| ConfigError::invalid("url", format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> ConfigResult<Self> {
        Self::new(KeycloakConfig::from_provider_config(config)?)
    }

    /// Factory suitable for [`warden_auth::ProviderFactories::register`].
    pub fn factory(config: &ProviderConfig) -> ConfigResult<Arc<dyn Provider>> {
        Ok(Arc::new(Self::from_config(config)?))
    }

    pub fn config(&self) -> &KeycloakConfig {
        &self.config
    }

    /// Authenticate against the realm and build the principal.
    #[tracing::instrument(skip(self, password, totp), fields(realm = %self.config.realm))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        totp: Option<&str>,
    ) -> Result<KeycloakUser, KeycloakError> {
        let totp = totp.map(str::trim).filter(|t| !t.is_empty());
        if self.config.otp && !totp.is_some_and(is_valid_otp) {
            tracing::debug!("OTP required but missing or malformed");
            return Err(KeycloakError::InvalidOtp);
        }

        let token = self.password_grant(username, password, totp).await?;
        let intro = self.introspect(token.access_token.expose()).await?;
        if !intro.active {
            return Err(KeycloakError::InactiveToken);
        }

        let user = KeycloakUser::from_introspection(intro).with_token(token.access_token);
        tracing::debug!(
            roles = user.roles().len(),
            expires_in = token.expires_in,
            "user authenticated"
        );
        Ok(user)
    }

    /// Resolve an access token to the realm roles it carries.
    #[tracing::instrument(skip_all, fields(realm = %self.config.realm))]
    pub async fn roles_for_token(&self, token: &str) -> Result<Vec<Role>, KeycloakError> {
        let intro = self.introspect(token).await?;
        if !intro.active {
            return Err(KeycloakError::InactiveToken);
        }
        Ok(intro.into_roles().into_iter().map(Role::from).collect())
    }

    async fn password_grant(
        &self,
        username: &str,
        password: &str,
        totp: Option<&str>,
    ) -> Result<TokenResponse, KeycloakError> {
        let mut form = vec![
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose()),
            ("username", username),
            ("password", password),
            ("scope", "openid"),
        ];
        if let Some(totp) = totp {
            form.push(("totp", totp));
        }

        let response = self
            .http_client
            .post(self.config.token_url())
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                KeycloakError::ParseError(format!("failed to parse token response: {e}"))
            });
        }

        Err(rejection(status, &body))
    }

    async fn introspect(&self, token: &str) -> Result<Introspection, KeycloakError> {
        let response = self
            .http_client
            .post(self.config.introspect_url())
            .header("Accept", "application/json")
            .form(&[
                ("token", token),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.expose()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                KeycloakError::ParseError(format!("failed to parse introspection response: {e}"))
            });
        }

        Err(rejection(status, &body))
    }
}

/// Classify a non-2xx answer from Keycloak.
fn rejection(status: StatusCode, body: &str) -> KeycloakError {
    let oauth = serde_json::from_str::<ErrorResponse>(body).ok();
    match (status, oauth) {
        (StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED, Some(err))
            if err.error == "invalid_grant" =>
        {
            KeycloakError::InvalidCredentials
        }
        (StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED, Some(err))
            if err.error == "invalid_client" || err.error == "unauthorized_client" =>
        {
            KeycloakError::ClientRejected(err.error_description.unwrap_or(err.error))
        }
        _ => KeycloakError::UnexpectedResponse {
            status: status.as_u16(),
            body: body.chars().take(256).collect(),
        },
    }
}

fn is_valid_otp(totp: &str) -> bool {
    totp.len() == OTP_LENGTH && totp.bytes().all(|b| b.is_ascii_digit())
}

fn log_failure(operation: &'static str, err: &KeycloakError) {
    if err.is_server_error() {
        tracing::error!(operation, code = err.code(), error = %err, "Keycloak call failed");
    } else {
        tracing::warn!(operation, code = err.code(), error = %err, "Keycloak rejected request");
    }
}

#[async_trait]
impl IdentityProvider for KeycloakProvider {
    async fn login(
        &self,
        username: &str,
        password: &str,
        totp: Option<&str>,
    ) -> Result<Box<dyn User>, Box<dyn LoginError>> {
        match self.authenticate(username, password, totp).await {
            Ok(user) => Ok(Box::new(user)),
            Err(e) => {
                log_failure("login", &e);
                Err(Box::new(e))
            }
        }
    }

    fn ttl(&self) -> DateTime<Utc> {
        Duration::try_seconds(self.config.ttl_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn otp(&self) -> bool {
        self.config.otp
    }
}

#[async_trait]
impl TokenValidator for KeycloakProvider {
    async fn validate(&self, token: &str) -> Result<Vec<Role>, Box<dyn LoginError>> {
        self.roles_for_token(token).await.map_err(|e| {
            log_failure("validate", &e);
            Box::new(e) as Box<dyn LoginError>
        })
    }
}
