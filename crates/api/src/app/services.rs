use std::sync::Arc;

use warden_auth::{
    Authorizer, Constraints, ProviderFactories, ProviderRegistry, SecurityConstraints,
};
use warden_keycloak::KeycloakProvider;

use crate::config::{ServerConfig, ServerConfigError};

/// Immutable state shared by every handler.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub constraints: Arc<SecurityConstraints>,
    pub providers: Arc<ProviderRegistry>,
}

impl AppServices {
    pub fn new(constraints: SecurityConstraints, providers: ProviderRegistry) -> Self {
        Self {
            constraints: Arc::new(constraints),
            providers: Arc::new(providers),
        }
    }

    /// The request-time engine over the same constraint set and registry.
    pub fn authorizer(&self) -> Arc<dyn Constraints> {
        Arc::new(Authorizer::new(
            Arc::clone(&self.constraints),
            Arc::clone(&self.providers),
        ))
    }
}

/// Provider types the server binary knows how to build.
pub fn default_factories() -> ProviderFactories {
    ProviderFactories::new().register(warden_keycloak::PROVIDER_TYPE, KeycloakProvider::factory)
}

pub fn build_services(
    config: ServerConfig,
    factories: &ProviderFactories,
) -> Result<AppServices, ServerConfigError> {
    let constraints = SecurityConstraints::from_config(config.security);
    let providers = ProviderRegistry::from_config(factories, config.organizations)?;

    tracing::info!(
        public = constraints.public_constraints.len(),
        constraints = constraints.constraints.len(),
        organizations = providers.len(),
        "services ready"
    );

    Ok(AppServices::new(constraints, providers))
}
