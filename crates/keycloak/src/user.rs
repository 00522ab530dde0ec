use warden_auth::{Role, User, UserInfo};
use warden_core::SecretString;

use crate::wire::Introspection;

/// Principal authenticated by Keycloak.
#[derive(Debug, Clone)]
pub struct KeycloakUser {
    info: UserInfo,
    roles: Vec<Role>,
    token: Option<SecretString>,
}

impl KeycloakUser {
    pub fn new(info: UserInfo, roles: Vec<Role>) -> Self {
        Self {
            info,
            roles,
            token: None,
        }
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub(crate) fn from_introspection(intro: Introspection) -> Self {
        let username = intro
            .preferred_username
            .clone()
            .or_else(|| intro.username.clone())
            .unwrap_or_default();
        let info = UserInfo {
            name: intro.name.clone().unwrap_or_else(|| username.clone()),
            username,
            email: intro.email.clone().unwrap_or_default(),
        };
        let roles = intro.into_roles().into_iter().map(Role::from).collect();
        Self::new(info, roles)
    }
}

impl User for KeycloakUser {
    fn user_info(&self) -> &UserInfo {
        &self.info
    }

    fn roles(&self) -> &[Role] {
        &self.roles
    }

    fn token(&self) -> Option<&str> {
        self.token.as_ref().map(SecretString::expose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::RealmAccess;

    #[test]
    fn profile_falls_back_to_username() {
        let user = KeycloakUser::from_introspection(Introspection {
            active: true,
            username: Some("jdoe".into()),
            realm_access: Some(RealmAccess {
                roles: vec!["user".into()],
            }),
            ..Default::default()
        });

        assert_eq!(user.user_info().username, "jdoe");
        assert_eq!(user.user_info().name, "jdoe");
        assert_eq!(user.user_info().email, "");
        assert!(user.has_role(&Role::new("user")));
        assert!(user.token().is_none());
    }

    #[test]
    fn token_is_not_logged() {
        let user = KeycloakUser::new(UserInfo::default(), vec![])
            .with_token(SecretString::new("eyJ.secret.token"));
        assert_eq!(user.token(), Some("eyJ.secret.token"));
        assert!(!format!("{user:?}").contains("eyJ.secret.token"));
    }
}
