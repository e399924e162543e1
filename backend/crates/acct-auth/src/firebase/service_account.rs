//! Google service-account credentials, as downloaded from the Firebase console.

use crate::{ProviderError, ProviderResult};

use std::fmt;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    #[serde(rename = "type")]
    pub account_type: String,
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccount {
    #[track_caller]
    pub fn from_json(json: &str) -> ProviderResult<Self> {
        let account: Self = serde_json::from_str(json)
            .map_err(|e| ProviderError::credentials(format!("Invalid credentials JSON: {}", e)))?;
        account.validate()?;
        Ok(account)
    }

    #[track_caller]
    pub fn from_file(path: &Path) -> ProviderResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::credentials(format!(
                "Failed to read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    #[track_caller]
    fn validate(&self) -> ProviderResult<()> {
        if self.account_type != "service_account" {
            return Err(ProviderError::credentials(format!(
                "Expected type 'service_account', found '{}'",
                self.account_type
            )));
        }
        if self.project_id.is_empty() {
            return Err(ProviderError::credentials("project_id is empty"));
        }
        if self.client_email.is_empty() {
            return Err(ProviderError::credentials("client_email is empty"));
        }
        if !self.private_key.contains("PRIVATE KEY") {
            return Err(ProviderError::credentials("private_key is not a PEM key"));
        }
        Ok(())
    }

    /// Expected `iss` claim of ID tokens minted for this project
    pub fn token_issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
