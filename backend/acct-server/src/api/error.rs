//! REST API error types
//!
//! Every variant maps to one [`ErrorKind`]; status, code and default message
//! come from the policy table, never from the handler.

use crate::api::envelope::{ApiErrorResponse, FieldErrors, STATUS_FAILED};
use crate::api::error_policy::ErrorKind;

use acct_auth::AuthError;
use acct_core::CoreError;
use acct_db::DbError;
use acct_mail::MailError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use log::{debug, error, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No authentication token {location}")]
    NoAuthToken { location: ErrorLocation },

    #[error("Invalid authentication token: {message} {location}")]
    InvalidAuthToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Email not verified {location}")]
    EmailNotVerified { location: ErrorLocation },

    #[error("Identity integrity: {message} {location}")]
    IdentityIntegrity {
        message: String,
        location: ErrorLocation,
    },

    /// Bad request shape (400). `fields` names the offending request fields.
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        fields: Vec<String>,
        location: ErrorLocation,
    },

    /// `message` is the provider's reason, logged only
    #[error("Invalid credentials: {message} {location}")]
    InvalidCredentials {
        message: String,
        location: ErrorLocation,
    },

    /// The provider refused the operation; `message` is its own error code
    #[error("Provider rejected request: {message:?} {location}")]
    ProviderRejected {
        message: Option<String>,
        location: ErrorLocation,
    },

    /// The mail queue refused a task; `detail` is logged only
    #[error("Task dispatch failed: {message} ({detail}) {location}")]
    TaskDispatch {
        message: String,
        detail: String,
        location: ErrorLocation,
    },

    #[error("Resource not found: {message:?} {location}")]
    NotFound {
        message: Option<String>,
        location: ErrorLocation,
    },

    /// Details are logged, never sent to the client
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NoAuthToken { .. } => ErrorKind::NoAuthToken,
            ApiError::InvalidAuthToken { .. } => ErrorKind::InvalidAuthToken,
            ApiError::EmailNotVerified { .. } => ErrorKind::EmailNotVerified,
            ApiError::IdentityIntegrity { .. } => ErrorKind::IdentityIntegrity,
            ApiError::Validation { .. } => ErrorKind::Validation,
            ApiError::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            ApiError::ProviderRejected { .. } => ErrorKind::ProviderRejected,
            ApiError::TaskDispatch { .. } => ErrorKind::TaskDispatch,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// 404 with the table's default message
    #[track_caller]
    pub fn not_found() -> Self {
        ApiError::NotFound {
            message: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            fields: Vec::new(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn task_dispatch(message: impl Into<String>, cause: &MailError) -> Self {
        ApiError::TaskDispatch {
            message: message.into(),
            detail: cause.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message sent to the client
    pub fn client_message(&self) -> String {
        let default = self.kind().policy().message;
        match self {
            ApiError::Validation { message, .. } | ApiError::TaskDispatch { message, .. } => {
                message.clone()
            }
            ApiError::ProviderRejected { message, .. } | ApiError::NotFound { message, .. } => {
                message.clone().unwrap_or_else(|| default.to_string())
            }
            _ => default.to_string(),
        }
    }

    fn fields(&self) -> Option<FieldErrors> {
        match self {
            ApiError::Validation { fields, .. } if !fields.is_empty() => Some(FieldErrors {
                fields: fields.clone(),
            }),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let policy = self.kind().policy();

        if policy.status.is_server_error() {
            error!("{}", self);
        } else if matches!(self.kind(), ErrorKind::TaskDispatch) {
            warn!("{}", self);
        } else {
            debug!("{}", self);
        }

        let body = ApiErrorResponse {
            status: STATUS_FAILED,
            code: policy.code,
            message: self.client_message(),
            data: self.fields(),
        };

        (policy.status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            AuthError::NoAuthToken { .. } => ApiError::NoAuthToken { location },
            AuthError::InvalidAuthToken { message, .. } => {
                ApiError::InvalidAuthToken { message, location }
            }
            AuthError::EmailVerification { .. } => ApiError::EmailNotVerified { location },
            AuthError::IdentityIntegrity { message, .. } => {
                ApiError::IdentityIntegrity { message, location }
            }
            AuthError::Storage { source, .. } => ApiError::Internal {
                message: source.to_string(),
                location,
            },
        }
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            CoreError::PasswordHash { .. } => ApiError::Internal {
                message: e.to_string(),
                location,
            },
            _ => ApiError::Validation {
                message: e.client_message(),
                fields: e.fields(),
                location,
            },
        }
    }
}

/// Storage details never reach the client
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        ApiError::Internal {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(e: JsonRejection) -> Self {
        ApiError::Validation {
            message: format!("Invalid request body: {}", e.body_text()),
            fields: Vec::new(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    #[track_caller]
    fn from(e: QueryRejection) -> Self {
        ApiError::Validation {
            message: format!("Invalid query string: {}", e.body_text()),
            fields: Vec::new(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
