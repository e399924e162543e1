use serde::Deserialize;

/// Missing fields deserialize to `None` so presence is reported with the
/// validator's message rather than a body rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}
