use acct_auth::ProviderError;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid email address '{address}': {message} {location}")]
    Address {
        address: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to build email: {message} {location}")]
    Build {
        message: String,
        location: ErrorLocation,
    },

    #[error("SMTP error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Mail queue is full {location}")]
    QueueFull { location: ErrorLocation },

    #[error("Mail worker has stopped {location}")]
    QueueClosed { location: ErrorLocation },

    #[error("Action link could not be generated: {source} {location}")]
    Link {
        #[source]
        source: ProviderError,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, MailError>;
