use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_FROM_ADDRESS, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_TEAM_NAME, MAX_QUEUE_CAPACITY, MIN_QUEUE_CAPACITY, SmtpConfig,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub from_address: String,
    /// Signature line of outgoing mail
    pub team_name: String,
    /// Pending mail tasks before enqueue starts failing
    pub queue_capacity: usize,
    /// Messages are only logged when unset
    pub smtp: Option<SmtpConfig>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_address: String::from(DEFAULT_FROM_ADDRESS),
            team_name: String::from(DEFAULT_TEAM_NAME),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            smtp: None,
        }
    }
}

impl MailConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.from_address.contains('@') {
            return Err(ConfigError::mail(format!(
                "mail.from_address must be an email address, got '{}'",
                self.from_address
            )));
        }

        if !(MIN_QUEUE_CAPACITY..=MAX_QUEUE_CAPACITY).contains(&self.queue_capacity) {
            return Err(ConfigError::mail(format!(
                "mail.queue_capacity must be {}-{}, got {}",
                MIN_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY, self.queue_capacity
            )));
        }

        if let Some(ref smtp) = self.smtp {
            smtp.validate()?;
        }

        Ok(())
    }
}
