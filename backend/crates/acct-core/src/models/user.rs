//! User identity record - the local mirror of an identity-provider account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A locally stored user, linked to exactly one provider account through
/// `firebase_uid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Provider subject identifier (unique)
    pub firebase_uid: String,
    pub email: String,
    /// bcrypt hash, only ever compared locally
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name used to greet the user in outgoing mail
    pub fn display_name(&self) -> String {
        capitalize(&self.first_name)
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
