mod config;
mod database_config;
mod error;
mod firebase_config;
mod log_level;
mod logging_config;
mod mail_config;
mod security_config;
mod server_config;
mod smtp_config;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use firebase_config::FirebaseConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use mail_config::MailConfig;
pub use security_config::SecurityConfig;
pub use server_config::ServerConfig;
pub use smtp_config::SmtpConfig;

pub const CONFIG_DIR_ENV: &str = "ACCT_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".acct";
pub const CONFIG_FILENAME: &str = "config.toml";
/// Credentials variable read by the Firebase Admin tooling; honored as a fallback
pub const LEGACY_CREDENTIALS_ENV: &str = "FIREBASE_ADMIN_SDK_CREDENTIALS_PATH";

// Server
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const MIN_PORT: u16 = 1024;

// Database
pub const DEFAULT_DATABASE_FILENAME: &str = "accounts.db";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const MIN_DB_MAX_CONNECTIONS: u32 = 1;
pub const MAX_DB_MAX_CONNECTIONS: u32 = 100;

// Logging
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
pub const DEFAULT_LOG_DIRECTORY: &str = "log";
pub const DEFAULT_LOG_COLORED: bool = true;

// Firebase
pub const DEFAULT_ACTION_URL: &str = "https://www.yourwebsite.example/";
pub const DEFAULT_HANDLE_CODE_IN_APP: bool = true;
pub const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
pub const DEFAULT_KEY_REFRESH_SECS: u64 = 3600;
pub const MIN_KEY_REFRESH_SECS: u64 = 60;

// Mail
pub const DEFAULT_FROM_ADDRESS: &str = "noreply@localhost";
pub const DEFAULT_TEAM_NAME: &str = "Your website team";
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
pub const MIN_QUEUE_CAPACITY: usize = 1;
pub const MAX_QUEUE_CAPACITY: usize = 100_000;
pub const DEFAULT_SMTP_PORT: u16 = 465;

// Security
pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[cfg(test)]
mod tests;
