use serde::{Deserialize, Serialize};

use crate::Role;

/// Profile of an authenticated principal, as reported by its identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Display name (e.g. "Jane Doe").
    pub name: String,
    /// Login name.
    pub username: String,
    pub email: String,
}

/// An authenticated principal.
///
/// Each identity provider has its own variant. A principal is created per
/// successful login or token validation and owned by the caller for the
/// duration of the request; the gate never persists it.
pub trait User: core::fmt::Debug + Send + Sync {
    fn user_info(&self) -> &UserInfo;

    /// Every role the provider granted for the principal's tenant.
    fn roles(&self) -> &[Role];

    /// Session token issued alongside the principal, if the provider has one.
    fn token(&self) -> Option<&str> {
        None
    }

    fn has_role(&self, role: &Role) -> bool {
        self.roles().contains(role)
    }
}
