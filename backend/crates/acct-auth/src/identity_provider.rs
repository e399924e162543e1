use crate::{ActionCodeSettings, ProviderResult, ProviderSession, TokenClaims};

use async_trait::async_trait;

/// Operations the service needs from the external identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify signature, expiry, audience and issuer of an ID token
    async fn verify_id_token(&self, id_token: &str) -> ProviderResult<TokenClaims>;

    async fn create_account(&self, email: &str, password: &str) -> ProviderResult<ProviderSession>;

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<ProviderSession>;

    /// Delete an account with admin privileges
    async fn delete_account(&self, uid: &str) -> ProviderResult<()>;

    /// Delete the account the ID token belongs to
    async fn delete_account_with_token(&self, id_token: &str) -> ProviderResult<()>;

    async fn update_email(&self, uid: &str, email: &str) -> ProviderResult<()>;

    async fn generate_email_verification_link(
        &self,
        email: &str,
        settings: &ActionCodeSettings,
    ) -> ProviderResult<String>;

    async fn generate_password_reset_link(
        &self,
        email: &str,
        settings: &ActionCodeSettings,
    ) -> ProviderResult<String>;
}
