//! Local password hashing.
//!
//! The hash stored next to each user is never used to authenticate against
//! the identity provider. It only lets sign-in notice that the provider
//! accepted a password the local record does not know yet.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

pub const DEFAULT_BCRYPT_COST: u32 = 12;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    #[track_caller]
    pub fn hash(&self, password: &str) -> CoreErrorResult<String> {
        bcrypt::hash(password, self.cost).map_err(|source| CoreError::PasswordHash {
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Returns `false` for a malformed stored hash instead of failing: a stale
    /// or foreign hash simply gets rewritten on the next successful sign-in.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}
