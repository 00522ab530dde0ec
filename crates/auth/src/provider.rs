//! Identity provider capability.
//!
//! Each SSO backend implements [`IdentityProvider`] (interactive login) and
//! [`TokenValidator`] (bearer token → roles). The two together form a
//! [`Provider`], which is what the registry hands to the authorization engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{Role, User};

/// Error returned by an identity provider.
///
/// Variants carry provider-specific detail, but every one of them exposes a
/// numeric code in the HTTP status classes: 4xx for caller mistakes
/// (bad credentials, missing OTP), 5xx for provider or transport failures.
pub trait LoginError: std::error::Error + Send + Sync + 'static {
    fn code(&self) -> u16;

    fn is_server_error(&self) -> bool {
        self.code() >= 500
    }
}

/// Interactive authentication against an SSO backend.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for an authenticated principal.
    ///
    /// `totp` is the one-time password, if the caller supplied one.
    async fn login(
        &self,
        username: &str,
        password: &str,
        totp: Option<&str>,
    ) -> Result<Box<dyn User>, Box<dyn LoginError>>;

    /// Absolute expiry of a session started now.
    ///
    /// Recomputed on every call from the current time and the configured
    /// lifetime.
    fn ttl(&self) -> DateTime<Utc>;

    /// Whether this provider requires a one-time password on login.
    fn otp(&self) -> bool;
}

/// Bearer token validation (the authentication service the engine consults).
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validate `token` and return the roles it grants.
    ///
    /// Rejected tokens yield a 4xx-class error; provider/transport failures a
    /// 5xx-class error.
    async fn validate(&self, token: &str) -> Result<Vec<Role>, Box<dyn LoginError>>;
}

/// A complete identity provider: login plus token validation.
pub trait Provider: IdentityProvider + TokenValidator {}

impl<T> Provider for T where T: IdentityProvider + TokenValidator {}
