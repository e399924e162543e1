use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmailRequest {
    /// New address
    #[serde(default)]
    pub email: Option<String>,
    /// Must name the authenticated caller
    #[serde(default)]
    pub firebase_uid: Option<String>,
}
