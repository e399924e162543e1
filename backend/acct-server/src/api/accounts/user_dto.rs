use acct_core::User;

use serde::Serialize;

/// User DTO for JSON serialization. The password hash is never included.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub firebase_uid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            firebase_uid: u.firebase_uid,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}
