use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACTION_URL, DEFAULT_HANDLE_CODE_IN_APP,
    DEFAULT_IDENTITY_TOOLKIT_URL, DEFAULT_JWKS_URL, DEFAULT_KEY_REFRESH_SECS,
    MIN_KEY_REFRESH_SECS,
};

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    /// Service-account JSON, absolute or relative to the config directory
    pub credentials_path: Option<String>,
    /// Web API key used for password sign-up and sign-in
    pub web_api_key: Option<String>,
    /// Continue URL embedded in emailed action links
    pub action_url: String,
    pub handle_code_in_app: bool,
    pub identity_toolkit_url: String,
    pub jwks_url: String,
    /// Maximum age of cached token-signing keys
    pub key_refresh_secs: u64,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            credentials_path: None,
            web_api_key: None,
            action_url: String::from(DEFAULT_ACTION_URL),
            handle_code_in_app: DEFAULT_HANDLE_CODE_IN_APP,
            identity_toolkit_url: String::from(DEFAULT_IDENTITY_TOOLKIT_URL),
            jwks_url: String::from(DEFAULT_JWKS_URL),
            key_refresh_secs: DEFAULT_KEY_REFRESH_SECS,
        }
    }
}

impl FirebaseConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        let credentials = self.resolved_credentials_path(config_dir).ok_or_else(|| {
            ConfigError::firebase(
                "firebase.credentials_path is required (or set FIREBASE_ADMIN_SDK_CREDENTIALS_PATH)",
            )
        })?;

        if !credentials.is_file() {
            return Err(ConfigError::firebase(format!(
                "firebase.credentials_path does not exist: {}",
                credentials.display()
            )));
        }

        if self.web_api_key.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::firebase("firebase.web_api_key is required"));
        }

        for (name, url) in [
            ("action_url", &self.action_url),
            ("identity_toolkit_url", &self.identity_toolkit_url),
            ("jwks_url", &self.jwks_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::firebase(format!(
                    "firebase.{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if self.key_refresh_secs < MIN_KEY_REFRESH_SECS {
            return Err(ConfigError::firebase(format!(
                "firebase.key_refresh_secs must be >= {}, got {}",
                MIN_KEY_REFRESH_SECS, self.key_refresh_secs
            )));
        }

        Ok(())
    }

    /// Credentials path with relative paths resolved against `config_dir`
    pub fn resolved_credentials_path(&self, config_dir: &Path) -> Option<PathBuf> {
        let path = self.credentials_path.as_deref().filter(|p| !p.is_empty())?;
        let path = Path::new(path);

        Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            config_dir.join(path)
        })
    }
}

impl fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("credentials_path", &self.credentials_path)
            .field("web_api_key", &self.web_api_key.as_ref().map(|_| "<redacted>"))
            .field("action_url", &self.action_url)
            .field("handle_code_in_app", &self.handle_code_in_app)
            .field("identity_toolkit_url", &self.identity_toolkit_url)
            .field("jwks_url", &self.jwks_url)
            .field("key_refresh_secs", &self.key_refresh_secs)
            .finish()
    }
}
