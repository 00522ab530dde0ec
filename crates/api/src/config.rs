//! Server configuration file.

use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;
use thiserror::Error;

use warden_auth::{ProviderConfig, SecurityConfig};
use warden_core::{ConfigError, Organization};

pub const CONFIG_PATH_ENV: &str = "WARDEN_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "warden.json";

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything the gate needs at startup: the constraint set and one provider
/// configuration per organization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub security: SecurityConfig,
    pub organizations: BTreeMap<Organization, ProviderConfig>,
}

impl ServerConfig {
    pub fn from_json(raw: &str) -> Result<Self, ServerConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ServerConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ServerConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Load from `$WARDEN_CONFIG`, falling back to `warden.json`.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        tracing::info!(%path, "loading configuration");
        Self::from_path(path)
    }
}
