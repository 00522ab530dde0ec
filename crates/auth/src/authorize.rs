//! Request-time authorization decision.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{LoginError, Method, ProviderRegistry, SecurityConstraints, UnmatchedPolicy};

/// Authorization could not be decided (as opposed to being decided "no").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The request named no organization, or one without a provider.
    #[error("unknown organization '{0}'")]
    UnknownOrganization(String),

    #[error("missing bearer token")]
    MissingToken,

    /// The provider rejected the token (expired, revoked, malformed).
    #[error("invalid bearer token: {0}")]
    InvalidToken(String),

    /// The provider could not be reached or answered unexpectedly.
    #[error("identity provider failure ({code}): {message}")]
    Provider { code: u16, message: String },
}

impl AuthorizationError {
    fn from_login_error(err: &dyn LoginError) -> Self {
        if err.is_server_error() {
            Self::Provider {
                code: err.code(),
                message: err.to_string(),
            }
        } else {
            Self::InvalidToken(err.to_string())
        }
    }
}

/// The two-stage access check the HTTP boundary depends on.
///
/// `authorization_path` keeps "not authorized" (`Ok(false)`) and "could not
/// check" (`Err`) apart because they map to different responses.
#[async_trait]
pub trait Constraints: Send + Sync {
    /// True iff the route is public for `method`.
    fn validate_public_constraints(&self, path: &str, method: &Method) -> bool;

    /// Role check for a non-public route.
    async fn authorization_path(
        &self,
        bearer_token: &str,
        path: &str,
        method: &Method,
        org: &str,
    ) -> Result<bool, AuthorizationError>;
}

/// Production [`Constraints`]: static policy plus per-organization providers.
#[derive(Debug, Clone)]
pub struct Authorizer {
    constraints: Arc<SecurityConstraints>,
    providers: Arc<ProviderRegistry>,
}

impl Authorizer {
    pub fn new(constraints: Arc<SecurityConstraints>, providers: Arc<ProviderRegistry>) -> Self {
        Self {
            constraints,
            providers,
        }
    }
}

#[async_trait]
impl Constraints for Authorizer {
    fn validate_public_constraints(&self, path: &str, method: &Method) -> bool {
        self.constraints.validate_public_constraints(path, method)
    }

    #[tracing::instrument(skip_all, fields(path = %path, method = %method, org = %org))]
    async fn authorization_path(
        &self,
        bearer_token: &str,
        path: &str,
        method: &Method,
        org: &str,
    ) -> Result<bool, AuthorizationError> {
        let Some(constraint) = self.constraints.find_constraint(path) else {
            let allowed = self.constraints.unmatched == UnmatchedPolicy::Allow;
            tracing::debug!(allowed, "no constraint matches path");
            return Ok(allowed);
        };

        let provider = self
            .providers
            .lookup(org)
            .ok_or_else(|| AuthorizationError::UnknownOrganization(org.to_string()))?;

        let token = bearer_token.trim();
        if token.is_empty() {
            return Err(AuthorizationError::MissingToken);
        }

        let roles = provider
            .validate(token)
            .await
            .map_err(|e| AuthorizationError::from_login_error(e.as_ref()))?;

        let allowed = constraint.permits(&roles, method);
        tracing::debug!(
            allowed,
            pattern = %constraint.pattern,
            roles = ?roles,
            "constraint evaluated"
        );
        Ok(allowed)
    }
}
