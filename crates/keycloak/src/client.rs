//! Shared HTTP client construction.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Client builder with the standard Warden User-Agent.
pub(crate) fn builder() -> ClientBuilder {
    Client::builder().user_agent(user_agent())
}

/// Pooled client with a request timeout. `reqwest::Client` is safe to share
/// across concurrent requests.
pub(crate) fn new_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
    builder().timeout(timeout).build()
}

/// Format: `warden-keycloak/{version}`.
pub(crate) fn user_agent() -> String {
    format!("warden-keycloak/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_has_correct_format() {
        let ua = user_agent();
        let parts: Vec<&str> = ua.split('/').collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], "warden-keycloak");
    }

    #[test]
    fn client_builds_with_timeout() {
        assert!(new_client_with_timeout(Duration::from_secs(1)).is_ok());
    }
}
