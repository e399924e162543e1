use crate::UserDto;

use acct_auth::ProviderSession;

use serde::Serialize;

/// Provider session tokens plus the local record, returned by sign-in
#[derive(Debug, Serialize)]
pub struct SignInData {
    pub firebase_id: String,
    pub firebase_access_token: String,
    pub firebase_refresh_token: String,
    pub firebase_expires_in: String,
    pub firebase_kind: String,
    pub user_data: UserDto,
}

impl SignInData {
    pub fn new(session: ProviderSession, user: UserDto) -> Self {
        Self {
            firebase_id: session.local_id,
            firebase_access_token: session.id_token,
            firebase_refresh_token: session.refresh_token,
            firebase_expires_in: session.expires_in,
            firebase_kind: session.kind,
            user_data: user,
        }
    }
}
