use error_location::ErrorLocation;
use std::panic::Location;
use thiserror::Error;

/// Failures talking to the identity provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Identity provider request failed: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Identity provider rejected the request ({status}): {message} {location}")]
    Rejected {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unexpected identity provider response: {message} {location}")]
    Response {
        message: String,
        location: ErrorLocation,
    },

    #[error("ID token rejected: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("No public key for kid '{kid}' {location}")]
    UnknownKey { kid: String, location: ErrorLocation },

    #[error("Service account credentials invalid: {message} {location}")]
    Credentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("JWT error: {source} {location}")]
    Jwt {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },
}

impl ProviderError {
    #[track_caller]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn response(message: impl Into<String>) -> Self {
        Self::Response {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The provider's own error code (e.g. `EMAIL_EXISTS`) when it answered with one
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for ProviderError {
    #[track_caller]
    fn from(source: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
