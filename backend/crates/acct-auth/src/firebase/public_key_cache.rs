use crate::{ProviderError, ProviderResult};

use std::collections::HashMap;
use std::future::Future;
use std::panic::Location;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use jsonwebtoken::DecodingKey;
use tokio::sync::RwLock;

/// Minimum spacing between refetches triggered by an unrecognized `kid`
pub const UNKNOWN_KID_COOLDOWN: Duration = Duration::from_secs(30);

#[derive(Default)]
struct KeySet {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Option<Instant>,
}

impl KeySet {
    fn is_fresh(&self, max_age: Duration) -> bool {
        self.fetched_at
            .is_some_and(|fetched_at| fetched_at.elapsed() < max_age)
    }

    fn cached_or_cooling(
        &self,
        kid: &str,
        max_age: Duration,
        cooldown: Duration,
    ) -> Option<ProviderResult<DecodingKey>> {
        if !self.is_fresh(max_age) {
            return None;
        }
        if let Some(key) = self.keys.get(kid) {
            return Some(Ok(key.clone()));
        }
        // Unknown kid inside the cooldown: reject without refetching
        self.is_fresh(cooldown).then(|| Err(unknown_key(kid)))
    }
}

/// Token-signing public keys, indexed by `kid`.
///
/// Refetched when older than `max_age`, or when a token names a key the
/// cached set does not contain (the provider rotates keys). The second kind
/// of refetch happens at most once per `cooldown`; in between, unknown kids
/// are rejected from the cache.
pub struct PublicKeyCache {
    max_age: Duration,
    cooldown: Duration,
    set: RwLock<KeySet>,
}

impl PublicKeyCache {
    pub fn new(max_age: Duration) -> Self {
        Self::with_cooldown(max_age, UNKNOWN_KID_COOLDOWN)
    }

    pub fn with_cooldown(max_age: Duration, cooldown: Duration) -> Self {
        Self {
            max_age,
            cooldown,
            set: RwLock::new(KeySet::default()),
        }
    }

    pub async fn get<F, Fut>(&self, kid: &str, fetch: F) -> ProviderResult<DecodingKey>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProviderResult<HashMap<String, DecodingKey>>>,
    {
        // Fast path under the read lock
        if let Some(result) = self
            .set
            .read()
            .await
            .cached_or_cooling(kid, self.max_age, self.cooldown)
        {
            return result;
        }

        let mut set = self.set.write().await;

        // Another task may have refreshed while we waited
        if let Some(result) = set.cached_or_cooling(kid, self.max_age, self.cooldown) {
            return result;
        }

        set.keys = fetch().await?;
        set.fetched_at = Some(Instant::now());

        set.keys
            .get(kid)
            .cloned()
            .ok_or_else(|| unknown_key(kid))
    }

    pub async fn key_count(&self) -> usize {
        self.set.read().await.keys.len()
    }
}

#[track_caller]
fn unknown_key(kid: &str) -> ProviderError {
    ProviderError::UnknownKey {
        kid: kid.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
