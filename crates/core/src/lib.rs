//! `warden-core`: shared primitives for the authorization gate.
//!
//! This crate is transport-agnostic: it knows nothing about HTTP frameworks or
//! identity providers, only the vocabulary they share.

pub mod error;
pub mod org;
pub mod secret;

pub use error::{ConfigError, ConfigResult};
pub use org::{AUTHORIZATION_HEADER, ORGANIZATION_HEADER, Organization};
pub use secret::SecretString;
