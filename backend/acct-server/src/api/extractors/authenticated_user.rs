//! Axum extractor that authenticates the bearer token of a request

use crate::{ApiError, AppState};

use acct_core::User;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The local user behind the request's `Authorization` header.
///
/// Rejects with the authenticator's failure kind; handlers taking this
/// argument never run for unauthenticated requests.
pub struct AuthenticatedUser(pub User);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts.headers.get(AUTHORIZATION).map(|value| {
                value.to_str().unwrap_or_else(|_| {
                    log::warn!("Authorization header is not valid UTF-8");
                    " "
                })
            });

            let user = state.authenticator.authenticate(header).await?;
            log::debug!("Authenticated user {} ({})", user.id, user.firebase_uid);

            Ok(AuthenticatedUser(user))
        }
    }
}
