use serde::{Deserialize, Serialize};

/// Tokens returned by the provider after a password sign-up or sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSession {
    pub local_id: String,
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Lifetime of `id_token` in seconds, as the provider formats it
    #[serde(default)]
    pub expires_in: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub email: String,
}
