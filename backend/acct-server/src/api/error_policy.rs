//! Failure kinds and the single table that maps each one to an HTTP status,
//! a machine-readable code and the message clients see by default.

use axum::http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoAuthToken,
    InvalidAuthToken,
    EmailNotVerified,
    IdentityIntegrity,
    Validation,
    InvalidCredentials,
    ProviderRejected,
    TaskDispatch,
    NotFound,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPolicy {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: &'static str,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::NoAuthToken,
        ErrorKind::InvalidAuthToken,
        ErrorKind::EmailNotVerified,
        ErrorKind::IdentityIntegrity,
        ErrorKind::Validation,
        ErrorKind::InvalidCredentials,
        ErrorKind::ProviderRejected,
        ErrorKind::TaskDispatch,
        ErrorKind::NotFound,
        ErrorKind::Internal,
    ];

    pub const fn policy(self) -> ErrorPolicy {
        let (status, code, message) = match self {
            ErrorKind::NoAuthToken => (
                StatusCode::UNAUTHORIZED,
                "NO_AUTH_TOKEN",
                "No authentication token provided.",
            ),
            ErrorKind::InvalidAuthToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTH_TOKEN",
                "Invalid authentication token provided.",
            ),
            ErrorKind::EmailNotVerified => (
                StatusCode::BAD_REQUEST,
                "EMAIL_NOT_VERIFIED",
                "Email not verified. please verify your email address.",
            ),
            ErrorKind::IdentityIntegrity => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IDENTITY_INTEGRITY",
                "The user provided with auth token is not linked to a local account.",
            ),
            ErrorKind::Validation => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Invalid request.",
            ),
            ErrorKind::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                "INVALID_CREDENTIALS",
                "Invalid email or password.",
            ),
            ErrorKind::ProviderRejected => (
                StatusCode::BAD_REQUEST,
                "PROVIDER_REJECTED",
                "The identity provider rejected the request.",
            ),
            ErrorKind::TaskDispatch => (
                StatusCode::BAD_REQUEST,
                "TASK_DISPATCH_FAILED",
                "Background task could not be queued; Please try again.",
            ),
            ErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "User does not exist.",
            ),
            ErrorKind::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error.",
            ),
        };

        ErrorPolicy {
            status,
            code,
            message,
        }
    }
}
