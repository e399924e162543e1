//! Best-effort undo of a provider-side change after the local step failed.
//!
//! One attempt, no retry. The outcome is logged and never changes the
//! response already decided by the caller.

use acct_auth::ProviderResult;

use std::future::Future;

use log::{error, info};

pub async fn compensate<F>(action: &str, subject: &str, undo: F)
where
    F: Future<Output = ProviderResult<()>>,
{
    match undo.await {
        Ok(()) => info!("Compensation succeeded: {} ({})", action, subject),
        Err(e) => error!("compensation failed: {} ({}): {}", action, subject, e),
    }
}
