//! Configuration error model.

use thiserror::Error;

/// Result type used when building runtime state from configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration-time failure.
///
/// These errors surface at startup (malformed provider settings, unknown
/// provider types) and are never produced on the request path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key was absent or empty.
    #[error("missing configuration key: {0}")]
    MissingKey(String),

    /// A key was present but its value could not be used.
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// No provider factory is registered under the requested `type`.
    #[error("unknown provider type: {0}")]
    UnknownProviderType(String),

    /// A path pattern in the security constraints was malformed.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// An organization identifier was malformed.
    #[error("invalid organization: {0}")]
    InvalidOrganization(String),
}

impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingKey(key.into())
    }

    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}
