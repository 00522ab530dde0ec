use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_auth::{User, UserInfo};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub totp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub ttl: DateTime<Utc>,
    pub user: UserInfo,
    pub roles: Vec<String>,
}

impl LoginResponse {
    pub fn new(user: &dyn User, ttl: DateTime<Utc>) -> Self {
        Self {
            token: user.token().map(str::to_owned),
            ttl,
            user: user.user_info().clone(),
            roles: role_names(user),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub organization: String,
    pub roles: Vec<String>,
}

fn role_names(user: &dyn User) -> Vec<String> {
    user.roles().iter().map(|r| r.as_str().to_owned()).collect()
}
