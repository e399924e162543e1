use acct_db::DbError;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No authentication token provided {location}")]
    NoAuthToken { location: ErrorLocation },

    #[error("Invalid authentication token: {message} {location}")]
    InvalidAuthToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Email not verified {location}")]
    EmailVerification { location: ErrorLocation },

    #[error("Identity integrity: {message} {location}")]
    IdentityIntegrity {
        message: String,
        location: ErrorLocation,
    },

    #[error("User lookup failed: {source} {location}")]
    Storage {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Message suitable for a client response
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::NoAuthToken { .. } => "No authentication token provided.",
            Self::InvalidAuthToken { .. } => "Invalid authentication token provided.",
            Self::EmailVerification { .. } => {
                "Email not verified. please verify your email address."
            }
            Self::IdentityIntegrity { .. } => {
                "The user provided with auth token is not linked to a local account."
            }
            Self::Storage { .. } => "Internal server error.",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
