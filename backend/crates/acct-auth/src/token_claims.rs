use serde::{Deserialize, Serialize};

/// Claims of a verified provider ID token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (provider uid)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Legacy copy of the subject some tokens still carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub exp: i64,
    pub iat: i64,
    pub aud: String,
    pub iss: String,
}

impl TokenClaims {
    /// Non-empty subject identifier, preferring `sub`
    pub fn subject(&self) -> Option<&str> {
        [self.sub.as_deref(), self.user_id.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}
