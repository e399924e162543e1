use crate::ProviderResult;

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Tokens are refreshed this long before the provider says they expire
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

struct CachedAccessToken {
    token: String,
    expires_at: Instant,
}

/// OAuth2 access token shared by all admin calls.
///
/// The lock is held across a refresh so concurrent callers wait for one
/// token exchange instead of each starting their own.
#[derive(Default)]
pub struct AccessTokenCache {
    current: Mutex<Option<CachedAccessToken>>,
}

impl AccessTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, or run `fetch` (yielding token and lifetime)
    /// when there is none or it is about to expire.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> ProviderResult<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProviderResult<(String, Duration)>>,
    {
        let mut current = self.current.lock().await;

        if let Some(cached) = current.as_ref()
            && Instant::now() + EXPIRY_MARGIN < cached.expires_at
        {
            return Ok(cached.token.clone());
        }

        let (token, lifetime) = fetch().await?;
        *current = Some(CachedAccessToken {
            token: token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token)
    }

    pub async fn clear(&self) {
        *self.current.lock().await = None;
    }
}
