//! Provider configuration: an immutable string map handed to a provider once,
//! at construction.

use std::collections::BTreeMap;

use serde::Deserialize;

use warden_core::{ConfigError, ConfigResult, SecretString};

pub const KEY_TYPE: &str = "type";
pub const KEY_URL: &str = "url";
pub const KEY_REALM: &str = "realm";
pub const KEY_CLIENT_ID: &str = "clientId";
pub const KEY_CLIENT_SECRET: &str = "clientSecret";
pub const KEY_TTL: &str = "ttl";
pub const KEY_OTP: &str = "otp";
pub const KEY_TIMEOUT: &str = "timeout";

/// Opaque key/value settings for one organization's identity provider.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ProviderConfig(BTreeMap<String, String>);

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Value for `key`, treating blank values as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, key: &str) -> ConfigResult<&str> {
        self.get(key).ok_or_else(|| ConfigError::missing(key))
    }

    pub fn require_secret(&self, key: &str) -> ConfigResult<SecretString> {
        self.require(key).map(SecretString::new)
    }

    /// The provider discriminator (`type`).
    pub fn provider_type(&self) -> ConfigResult<&str> {
        self.require(KEY_TYPE)
    }

    /// Session lifetime in seconds. Must be a positive integer.
    pub fn ttl_seconds(&self) -> ConfigResult<i64> {
        self.positive_seconds(KEY_TTL)?
            .ok_or_else(|| ConfigError::missing(KEY_TTL))
    }

    /// Optional positive number of seconds stored under `key`.
    pub fn positive_seconds(&self, key: &str) -> ConfigResult<Option<i64>> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        match raw.parse::<i64>() {
            Ok(secs) if secs > 0 => Ok(Some(secs)),
            Ok(_) => Err(ConfigError::invalid(key, "must be a positive number of seconds")),
            Err(e) => Err(ConfigError::invalid(key, e.to_string())),
        }
    }

    /// Whether one-time passwords are mandatory. Absent, blank or unparsable
    /// values mean `false`.
    pub fn otp(&self) -> bool {
        self.get(KEY_OTP)
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false)
    }
}

impl core::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.0 {
            if k.to_ascii_lowercase().contains("secret") {
                map.entry(k, &"[REDACTED]");
            } else {
                map.entry(k, v);
            }
        }
        map.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for ProviderConfig
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
