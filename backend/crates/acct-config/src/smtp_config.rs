use crate::{ConfigError, ConfigErrorResult, DEFAULT_SMTP_PORT};

use std::fmt;

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_SMTP_PORT,
            username: String::new(),
            password: String::new(),
        }
    }
}

impl SmtpConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::mail("mail.smtp.host cannot be empty"));
        }
        if self.port == 0 {
            return Err(ConfigError::mail("mail.smtp.port cannot be 0"));
        }
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ConfigError::mail(
                "mail.smtp.username and mail.smtp.password are required",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
