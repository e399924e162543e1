use acct_auth::{IdentityProvider, TokenAuthenticator};
use acct_core::PasswordHasher;
use acct_db::UserRepository;
use acct_mail::TaskQueue;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared, read-only handles cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub users: UserRepository,
    pub provider: Arc<dyn IdentityProvider>,
    pub authenticator: TokenAuthenticator,
    pub mail_queue: TaskQueue,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        provider: Arc<dyn IdentityProvider>,
        mail_queue: TaskQueue,
        hasher: PasswordHasher,
    ) -> Self {
        let users = UserRepository::new(pool.clone());
        let authenticator = TokenAuthenticator::new(Arc::clone(&provider), users.clone());

        Self {
            pool,
            users,
            provider,
            authenticator,
            mail_queue,
            hasher,
        }
    }
}
