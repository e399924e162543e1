use std::time::Duration;

pub const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
pub const DEFAULT_KEY_REFRESH_SECS: u64 = 3600;

/// Base URLs of the provider APIs. Overridable so tests can point at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseEndpoints {
    pub identity_toolkit_url: String,
    pub jwks_url: String,
    pub key_refresh: Duration,
}

impl FirebaseEndpoints {
    pub fn new(identity_toolkit_url: &str, jwks_url: &str, key_refresh: Duration) -> Self {
        Self {
            identity_toolkit_url: identity_toolkit_url.trim_end_matches('/').to_string(),
            jwks_url: jwks_url.to_string(),
            key_refresh,
        }
    }

    pub(crate) fn public(&self, method: &str) -> String {
        format!("{}/accounts:{}", self.identity_toolkit_url, method)
    }

    pub(crate) fn admin(&self, project_id: &str, method: &str) -> String {
        format!(
            "{}/projects/{}/accounts:{}",
            self.identity_toolkit_url, project_id, method
        )
    }
}

impl Default for FirebaseEndpoints {
    fn default() -> Self {
        Self::new(
            DEFAULT_IDENTITY_TOOLKIT_URL,
            DEFAULT_JWKS_URL,
            Duration::from_secs(DEFAULT_KEY_REFRESH_SECS),
        )
    }
}
