//! `warden-auth`: authorization core (transport-agnostic).
//!
//! No HTTP framework and no concrete SSO backend here: providers plug in
//! through the traits in [`provider`], and the HTTP boundary talks to the
//! engine through [`Constraints`].

pub mod authorize;
pub mod config;
pub mod constraints;
pub mod method;
pub mod pattern;
pub mod principal;
pub mod provider;
pub mod registry;
pub mod roles;

pub use authorize::{AuthorizationError, Authorizer, Constraints};
pub use config::ProviderConfig;
pub use constraints::{
    DenyMatcher, DenyRule, PermitMatcher, PermitRule, SecurityConfig, SecurityConstraints,
    UnmatchedPolicy,
};
pub use method::Method;
pub use pattern::PathPattern;
pub use principal::{User, UserInfo};
pub use provider::{IdentityProvider, LoginError, Provider, TokenValidator};
pub use registry::{ProviderFactories, ProviderFactory, ProviderRegistry};
pub use roles::Role;
