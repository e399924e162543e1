use chrono::{DateTime, Utc};

/// A user record ready to be inserted, created after the provider account exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub firebase_uid: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        firebase_uid: String,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        Self {
            firebase_uid,
            email,
            password_hash,
            first_name,
            last_name,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
