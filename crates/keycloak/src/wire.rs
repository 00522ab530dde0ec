//! Keycloak OpenID Connect response bodies (only the fields this crate uses).

use serde::Deserialize;

use warden_core::SecretString;

/// Successful response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(deserialize_with = "deserialize_secret_string")]
    pub access_token: SecretString,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// OAuth error body (`{"error": "...", "error_description": "..."}`).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// RFC 7662 introspection response with Keycloak's profile and role claims.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Introspection {
    pub active: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub realm_access: Option<RealmAccess>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Introspection {
    pub fn into_roles(self) -> Vec<String> {
        self.realm_access.map(|ra| ra.roles).unwrap_or_default()
    }
}

fn deserialize_secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::new(s))
}
