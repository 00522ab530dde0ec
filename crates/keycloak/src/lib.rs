//! Keycloak identity provider.
//!
//! Implements [`warden_auth::IdentityProvider`] and
//! [`warden_auth::TokenValidator`] on top of two Keycloak OpenID Connect
//! endpoints:
//!
//! 1. **Token endpoint** (`/realms/{realm}/protocol/openid-connect/token`):
//!    a resource-owner password grant exchanges username, password and,
//!    when the realm requires it, a TOTP code for an access token.
//! 2. **Introspection endpoint** (`.../token/introspect`): resolves an access
//!    token into the user profile and the realm roles granted to it. Login
//!    uses it right after the grant; bearer-token validation uses it alone.
//!
//! # Configuration
//!
//! Built from a [`warden_auth::ProviderConfig`] with the keys `url`, `realm`,
//! `clientId`, `clientSecret`, `ttl` (seconds), `otp` (`"true"` to require a
//! one-time password) and optionally `timeout` (seconds, default 10).
//!
//! # Security Considerations
//!
//! - The client secret and issued access tokens are wrapped in
//!   [`warden_core::SecretString`] and never logged.
//! - Tracing instrumentation skips passwords, OTP codes and tokens.
//! - Failures are not retried here; callers decide on retry policy.

mod client;
mod config;
mod error;
mod provider;
mod user;
mod wire;

pub use config::{KeycloakConfig, MAX_TTL_SECONDS};
pub use error::KeycloakError;
pub use provider::{KeycloakProvider, PROVIDER_TYPE};
pub use user::KeycloakUser;
