use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
