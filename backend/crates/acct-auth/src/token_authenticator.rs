use crate::{AuthError, IdentityProvider, Result as AuthErrorResult};

use acct_core::User;
use acct_db::UserRepository;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::debug;

/// Resolves a bearer token to the local user it belongs to.
///
/// Read-only: never writes to storage and never caches a result.
#[derive(Clone)]
pub struct TokenAuthenticator {
    provider: Arc<dyn IdentityProvider>,
    users: UserRepository,
}

impl TokenAuthenticator {
    pub fn new(provider: Arc<dyn IdentityProvider>, users: UserRepository) -> Self {
        Self { provider, users }
    }

    /// Authenticate the raw value of an `Authorization` header.
    ///
    /// The token is the last space-separated segment of the header, so both
    /// `Bearer <token>` and a bare `<token>` are accepted.
    pub async fn authenticate(&self, header: Option<&str>) -> AuthErrorResult<User> {
        let header = match header {
            Some(h) if !h.is_empty() => h,
            _ => {
                return Err(AuthError::NoAuthToken {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let token = extract_token(header);
        if token.is_empty() {
            return Err(AuthError::InvalidAuthToken {
                message: "empty bearer token".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let claims = self.provider.verify_id_token(token).await.map_err(|e| {
            debug!("ID token verification failed: {}", e);
            AuthError::InvalidAuthToken {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        if !claims.email_verified {
            return Err(AuthError::EmailVerification {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let Some(uid) = claims.subject() else {
            return Err(AuthError::IdentityIntegrity {
                message: "token has no subject identifier".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let user = self
            .users
            .find_by_firebase_uid(uid)
            .await
            .map_err(|source| AuthError::Storage {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        // Logged at error level when rendered as a 5xx response
        user.ok_or_else(|| AuthError::IdentityIntegrity {
            message: format!("verified subject {} has no local record", uid),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Last space-delimited segment of the header value
pub fn extract_token(header: &str) -> &str {
    header.rsplit(' ').next().unwrap_or_default()
}
