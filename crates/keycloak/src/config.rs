use std::time::Duration;

use url::Url;

use warden_auth::ProviderConfig;
use warden_auth::config::{
    KEY_CLIENT_ID, KEY_CLIENT_SECRET, KEY_REALM, KEY_TIMEOUT, KEY_TTL, KEY_URL,
};
use warden_core::{ConfigError, ConfigResult, SecretString};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound for `ttl`: one hundred years.
pub const MAX_TTL_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;

/// Validated Keycloak settings for one organization.
///
/// The client secret is wrapped in [`SecretString`], so the derived `Debug`
/// never shows it.
#[derive(Debug, Clone)]
pub struct KeycloakConfig {
    pub base_url: Url,
    pub realm: String,
    pub client_id: String,
    pub client_secret: SecretString,
    /// Session lifetime in seconds (always positive).
    pub ttl_seconds: i64,
    /// Whether a one-time password is mandatory on login.
    pub otp: bool,
    /// Per-request timeout for calls to Keycloak.
    pub timeout: Duration,
}

impl KeycloakConfig {
    /// Validate a raw provider configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required key is missing, `url` is not an
    /// absolute http(s) URL, or `ttl`/`timeout` are not positive integers.
    /// `ttl` is also capped at [`MAX_TTL_SECONDS`].
    pub fn from_provider_config(config: &ProviderConfig) -> ConfigResult<Self> {
        let base_url = parse_base_url(config.require(KEY_URL)?)?;
        let ttl_seconds = config.ttl_seconds()?;
        if ttl_seconds > MAX_TTL_SECONDS {
            return Err(ConfigError::invalid(
                KEY_TTL,
                format!("must not exceed {MAX_TTL_SECONDS} seconds"),
            ));
        }
        let timeout = config
            .positive_seconds(KEY_TIMEOUT)?
            .map(|secs| Duration::from_secs(secs.unsigned_abs()))
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            base_url,
            realm: config.require(KEY_REALM)?.to_string(),
            client_id: config.require(KEY_CLIENT_ID)?.to_string(),
            client_secret: config.require_secret(KEY_CLIENT_SECRET)?,
            ttl_seconds,
            otp: config.otp(),
            timeout,
        })
    }

    /// `{url}/realms/{realm}/protocol/openid-connect/token`
    pub fn token_url(&self) -> Url {
        self.openid_connect_url(&["token"])
    }

    /// `{url}/realms/{realm}/protocol/openid-connect/token/introspect`
    pub fn introspect_url(&self) -> Url {
        self.openid_connect_url(&["token", "introspect"])
    }

    fn openid_connect_url(&self, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url rejects cannot-be-a-base URLs, so this always applies.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["realms", self.realm.as_str(), "protocol", "openid-connect"])
                .extend(tail);
        }
        url
    }
}

fn parse_base_url(raw: &str) -> ConfigResult<Url> {
    let mut url = Url::parse(raw).map_err(|e| ConfigError::invalid(KEY_URL, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(KEY_URL, "scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::invalid(KEY_URL, "must be an absolute URL"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::invalid(KEY_URL, "must not carry a query or fragment"));
    }
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&path);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(url: &str) -> ProviderConfig {
        ProviderConfig::new()
            .with("type", "keycloak")
            .with("url", url)
            .with("realm", "ritchie")
            .with("clientId", "user-login")
            .with("clientSecret", "user-login")
            .with("ttl", "36000")
    }

    #[test]
    fn builds_endpoint_urls() {
        let cfg = KeycloakConfig::from_provider_config(&raw("http://localhost:8080")).unwrap();
        assert_eq!(
            cfg.token_url().as_str(),
            "http://localhost:8080/realms/ritchie/protocol/openid-connect/token"
        );
        assert_eq!(
            cfg.introspect_url().as_str(),
            "http://localhost:8080/realms/ritchie/protocol/openid-connect/token/introspect"
        );
    }

    #[test]
    fn keeps_legacy_auth_prefix() {
        let cfg = KeycloakConfig::from_provider_config(&raw("https://sso.example.com/auth/")).unwrap();
        assert_eq!(
            cfg.token_url().as_str(),
            "https://sso.example.com/auth/realms/ritchie/protocol/openid-connect/token"
        );
    }

    #[test]
    fn trims_every_trailing_slash() {
        let cfg =
            KeycloakConfig::from_provider_config(&raw("https://sso.example.com/auth//")).unwrap();
        assert_eq!(
            cfg.token_url().as_str(),
            "https://sso.example.com/auth/realms/ritchie/protocol/openid-connect/token"
        );
    }

    #[test]
    fn rejects_ttl_beyond_cap() {
        for ttl in ["10000000000000", "9223372036854775807"] {
            let cfg = raw("http://localhost:8080").with("ttl", ttl);
            let err = KeycloakConfig::from_provider_config(&cfg).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "ttl"),
                "{ttl}: {err:?}"
            );
        }

        let at_cap = raw("http://localhost:8080").with("ttl", MAX_TTL_SECONDS.to_string());
        assert_eq!(
            KeycloakConfig::from_provider_config(&at_cap).unwrap().ttl_seconds,
            MAX_TTL_SECONDS
        );
    }

    #[test]
    fn defaults() {
        let cfg = KeycloakConfig::from_provider_config(&raw("http://localhost:8080")).unwrap();
        assert_eq!(cfg.ttl_seconds, 36000);
        assert!(!cfg.otp);
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);

        let cfg = KeycloakConfig::from_provider_config(
            &raw("http://localhost:8080").with("timeout", "3").with("otp", "true"),
        )
        .unwrap();
        assert!(cfg.otp);
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_malformed_configuration() {
        assert!(KeycloakConfig::from_provider_config(&raw("any url")).is_err());
        assert!(KeycloakConfig::from_provider_config(&raw("ftp://host")).is_err());
        assert!(KeycloakConfig::from_provider_config(&raw("http://host?x=1")).is_err());
        assert!(
            KeycloakConfig::from_provider_config(&raw("http://host").with("ttl", "0")).is_err()
        );
        assert_eq!(
            KeycloakConfig::from_provider_config(&raw("http://host").with("realm", "")).unwrap_err(),
            ConfigError::missing("realm")
        );
    }

    #[test]
    fn client_secret_is_not_logged() {
        let cfg = KeycloakConfig::from_provider_config(
            &raw("http://localhost:8080").with("clientSecret", "super_secret_value"),
        )
        .unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("super_secret_value"));
        assert!(debug.contains("[REDACTED]"));
    }
}
