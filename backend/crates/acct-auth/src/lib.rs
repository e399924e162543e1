pub mod action_code_settings;
pub mod error;
pub mod firebase;
pub mod identity_provider;
pub mod provider_error;
pub mod provider_session;
pub mod token_authenticator;
pub mod token_claims;

pub use action_code_settings::ActionCodeSettings;
pub use error::{AuthError, Result};
pub use firebase::firebase_client::FirebaseClient;
pub use firebase::firebase_endpoints::FirebaseEndpoints;
pub use firebase::service_account::ServiceAccount;
pub use identity_provider::IdentityProvider;
pub use provider_error::{ProviderError, Result as ProviderResult};
pub use provider_session::ProviderSession;
pub use token_authenticator::TokenAuthenticator;
pub use token_claims::TokenClaims;
