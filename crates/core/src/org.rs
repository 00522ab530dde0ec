//! Organization (tenant) identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Request header carrying the organization a request is scoped to.
pub const ORGANIZATION_HEADER: &str = "x-org";

/// Request header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Identifier of an organization.
///
/// The organization selects which identity provider and settings apply to a
/// request. Identifiers are opaque, case-sensitive and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Organization(String);

impl Organization {
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidOrganization(
                "organization cannot be blank".to_string(),
            ));
        }
        if trimmed.len() != name.len() {
            return Ok(Self(trimmed.to_string()));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Organization {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Organization {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Organization {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Organization> for String {
    fn from(value: Organization) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_organization_rejected() {
        assert!(Organization::new("").is_err());
        assert!(Organization::new("   ").is_err());
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        let org = Organization::new(" zup ").unwrap();
        assert_eq!(org.as_str(), "zup");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let org: Organization = serde_json::from_str("\"zup\"").unwrap();
        assert_eq!(org, "zup".parse().unwrap());

        let err = serde_json::from_str::<Organization>("\"\"");
        assert!(err.is_err());
    }
}
