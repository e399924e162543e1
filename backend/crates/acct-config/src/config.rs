use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, FirebaseConfig, LEGACY_CREDENTIALS_ENV, LoggingConfig, MailConfig,
    SecurityConfig, ServerConfig, SmtpConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub firebase: FirebaseConfig,
    pub mail: MailConfig,
    pub security: SecurityConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. ACCT_CONFIG_DIR env var, else ./.acct/
    /// 2. Auto-create the config directory
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply ACCT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: ACCT_CONFIG_DIR env var > ./.acct/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.database.validate()?;
        self.firebase.validate(&config_dir)?;
        self.mail.validate()?;
        self.security.validate()?;

        Ok(())
    }

    /// Absolute path to the database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Absolute path to the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let Some(ref file) = self.logging.file else {
            return Ok(None);
        };
        Ok(Some(Self::config_dir()?.join(&self.logging.dir).join(file)))
    }

    /// Service-account credentials file, resolved against the config directory.
    pub fn credentials_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        self.firebase
            .resolved_credentials_path(&config_dir)
            .ok_or_else(|| ConfigError::firebase("firebase.credentials_path is not set"))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  firebase: credentials={}, web_api_key={}, key_refresh={}s",
            self.firebase.credentials_path.as_deref().unwrap_or("<unset>"),
            if self.firebase.web_api_key.is_some() {
                "set"
            } else {
                "unset"
            },
            self.firebase.key_refresh_secs
        );
        info!("  firebase: action_url={}", self.firebase.action_url);
        info!(
            "  mail: from={}, queue={}, transport={}",
            self.mail.from_address,
            self.mail.queue_capacity,
            match self.mail.smtp {
                Some(ref smtp) => format!("smtp {}:{}", smtp.host, smtp.port),
                None => String::from("log"),
            }
        );
        info!("  security: bcrypt_cost={}", self.security.bcrypt_cost);
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("ACCT_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("ACCT_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("ACCT_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "ACCT_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Logging
        Self::apply_env_parse("ACCT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ACCT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("ACCT_LOG_FILE", &mut self.logging.file);

        // Firebase
        Self::apply_env_option_string(
            LEGACY_CREDENTIALS_ENV,
            &mut self.firebase.credentials_path,
        );
        Self::apply_env_option_string(
            "ACCT_FIREBASE_CREDENTIALS_PATH",
            &mut self.firebase.credentials_path,
        );
        Self::apply_env_option_string(
            "ACCT_FIREBASE_WEB_API_KEY",
            &mut self.firebase.web_api_key,
        );
        Self::apply_env_string("ACCT_FIREBASE_ACTION_URL", &mut self.firebase.action_url);
        Self::apply_env_bool(
            "ACCT_FIREBASE_HANDLE_CODE_IN_APP",
            &mut self.firebase.handle_code_in_app,
        );
        Self::apply_env_string(
            "ACCT_FIREBASE_IDENTITY_TOOLKIT_URL",
            &mut self.firebase.identity_toolkit_url,
        );
        Self::apply_env_string("ACCT_FIREBASE_JWKS_URL", &mut self.firebase.jwks_url);
        Self::apply_env_parse(
            "ACCT_FIREBASE_KEY_REFRESH_SECS",
            &mut self.firebase.key_refresh_secs,
        );

        // Mail
        Self::apply_env_string("ACCT_MAIL_FROM_ADDRESS", &mut self.mail.from_address);
        Self::apply_env_string("ACCT_MAIL_TEAM_NAME", &mut self.mail.team_name);
        Self::apply_env_parse(
            "ACCT_MAIL_QUEUE_CAPACITY",
            &mut self.mail.queue_capacity,
        );
        self.apply_smtp_env_overrides();

        // Security
        Self::apply_env_parse("ACCT_BCRYPT_COST", &mut self.security.bcrypt_cost);
    }

    /// SMTP delivery is switched on by ACCT_SMTP_HOST alone
    fn apply_smtp_env_overrides(&mut self) {
        if self.mail.smtp.is_none() && std::env::var("ACCT_SMTP_HOST").is_ok() {
            self.mail.smtp = Some(SmtpConfig::default());
        }

        if let Some(ref mut smtp) = self.mail.smtp {
            Self::apply_env_string("ACCT_SMTP_HOST", &mut smtp.host);
            Self::apply_env_parse("ACCT_SMTP_PORT", &mut smtp.port);
            Self::apply_env_string("ACCT_SMTP_USERNAME", &mut smtp.username);
            Self::apply_env_string("ACCT_SMTP_PASSWORD", &mut smtp.password);
        }
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
