//! Provider registry: one identity provider per organization, selected by the
//! provider `type` in each organization's configuration.

use std::collections::HashMap;
use std::sync::Arc;

use warden_core::{ConfigError, ConfigResult, Organization};

use crate::{Provider, ProviderConfig};

/// Builds a provider from its configuration.
pub type ProviderFactory =
    Arc<dyn Fn(&ProviderConfig) -> ConfigResult<Arc<dyn Provider>> + Send + Sync>;

/// Provider factories keyed by provider `type` (e.g. `"keycloak"`).
///
/// New SSO backends are added by registering a factory here; nothing in the
/// authorization engine changes.
#[derive(Clone, Default)]
pub struct ProviderFactories {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderFactories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(mut self, provider_type: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&ProviderConfig) -> ConfigResult<Arc<dyn Provider>> + Send + Sync + 'static,
    {
        self.factories.insert(provider_type.into(), Arc::new(factory));
        self
    }

    pub fn build(&self, config: &ProviderConfig) -> ConfigResult<Arc<dyn Provider>> {
        let provider_type = config.provider_type()?;
        let factory = self
            .factories
            .get(provider_type)
            .ok_or_else(|| ConfigError::UnknownProviderType(provider_type.to_string()))?;
        factory(config)
    }
}

impl core::fmt::Debug for ProviderFactories {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}

/// Organization → provider lookup, built once at startup and read-only
/// afterwards.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<Organization, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct one provider per organization.
    ///
    /// Fails on the first organization whose configuration is malformed or
    /// names an unregistered provider type.
    pub fn from_config<I>(factories: &ProviderFactories, organizations: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (Organization, ProviderConfig)>,
    {
        let mut providers = HashMap::new();
        for (org, config) in organizations {
            let provider = factories.build(&config).map_err(|e| {
                tracing::error!(org = %org, error = %e, "failed to build identity provider");
                e
            })?;
            tracing::info!(
                org = %org,
                provider_type = config.provider_type().unwrap_or_default(),
                "identity provider registered"
            );
            providers.insert(org, provider);
        }
        Ok(Self { providers })
    }

    pub fn with_provider(mut self, org: Organization, provider: Arc<dyn Provider>) -> Self {
        self.providers.insert(org, provider);
        self
    }

    pub fn get(&self, org: &Organization) -> Option<Arc<dyn Provider>> {
        self.providers.get(org).cloned()
    }

    /// Look up by raw organization name (as read from a request header).
    pub fn lookup(&self, org: &str) -> Option<Arc<dyn Provider>> {
        let org = Organization::new(org).ok()?;
        self.get(&org)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl core::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.providers.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use crate::{IdentityProvider, LoginError, Role, TokenValidator, User};

    #[derive(Debug)]
    struct NullProvider {
        ttl: i64,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("not supported")]
    struct Unsupported;

    impl LoginError for Unsupported {
        fn code(&self) -> u16 {
            501
        }
    }

    #[async_trait]
    impl IdentityProvider for NullProvider {
        async fn login(
            &self,
            _username: &str,
            _password: &str,
            _totp: Option<&str>,
        ) -> Result<Box<dyn User>, Box<dyn LoginError>> {
            Err(Box::new(Unsupported))
        }

        fn ttl(&self) -> DateTime<Utc> {
            Utc::now() + chrono::Duration::seconds(self.ttl)
        }

        fn otp(&self) -> bool {
            false
        }
    }

    #[async_trait]
    impl TokenValidator for NullProvider {
        async fn validate(&self, _token: &str) -> Result<Vec<Role>, Box<dyn LoginError>> {
            Err(Box::new(Unsupported))
        }
    }

    fn factories() -> ProviderFactories {
        ProviderFactories::new().register("null", |cfg: &ProviderConfig| {
            let ttl = cfg.ttl_seconds()?;
            Ok(Arc::new(NullProvider { ttl }) as Arc<dyn Provider>)
        })
    }

    fn org(name: &str) -> Organization {
        Organization::new(name).unwrap()
    }

    #[test]
    fn builds_one_provider_per_organization() {
        let cfg = ProviderConfig::new().with("type", "null").with("ttl", "60");
        let registry = ProviderRegistry::from_config(
            &factories(),
            [(org("zup"), cfg.clone()), (org("acme"), cfg)],
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("zup").is_some());
        assert!(registry.lookup("acme").is_some());
        assert!(registry.lookup("notfound").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn unknown_provider_type_is_a_config_error() {
        let cfg = ProviderConfig::new().with("type", "ldap").with("ttl", "60");
        let err = ProviderRegistry::from_config(&factories(), [(org("zup"), cfg)]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownProviderType("ldap".to_string()));
    }

    #[test]
    fn factory_errors_propagate() {
        let cfg = ProviderConfig::new().with("type", "null").with("ttl", "0");
        let err = ProviderRegistry::from_config(&factories(), [(org("zup"), cfg)]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn missing_type_is_a_config_error() {
        let cfg = ProviderConfig::new().with("ttl", "60");
        let err = ProviderRegistry::from_config(&factories(), [(org("zup"), cfg)]).unwrap_err();
        assert_eq!(err, ConfigError::missing("type"));
    }
}
