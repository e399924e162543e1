use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] acct_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] acct_db::DbError),

    #[error("Identity provider setup failed: {0}")]
    Provider(#[from] acct_auth::ProviderError),

    #[error("Mail setup failed: {0}")]
    Mail(#[from] acct_mail::MailError),

    #[error("Failed to create log directory {path}: {source}")]
    LogDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
