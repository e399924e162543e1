use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Only 'first_name', 'last_name', can be updated. Invalid field(s): {} {location}", .fields.join(", "))]
    InvalidFields {
        fields: Vec<String>,
        location: ErrorLocation,
    },

    #[error("Invalid profile field: {value} {location}")]
    InvalidProfileField {
        value: String,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {source} {location}")]
    PasswordHash {
        #[source]
        source: bcrypt::BcryptError,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Message suitable for a client response (no location suffix)
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidFields { fields, .. } => format!(
                "Only 'first_name', 'last_name', can be updated. Invalid field(s): {}",
                fields.join(", ")
            ),
            Self::InvalidProfileField { value, .. } => {
                format!("Invalid profile field: {}", value)
            }
            Self::PasswordHash { .. } => "Password could not be processed.".to_string(),
        }
    }

    /// Field names the error refers to, if any
    pub fn fields(&self) -> Vec<String> {
        match self {
            Self::Validation {
                field: Some(field), ..
            } => vec![field.clone()],
            Self::InvalidFields { fields, .. } => fields.clone(),
            Self::InvalidProfileField { value, .. } => vec![value.clone()],
            _ => Vec::new(),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
