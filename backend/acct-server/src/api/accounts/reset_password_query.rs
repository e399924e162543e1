use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ResetPasswordQuery {
    #[serde(default)]
    pub email: Option<String>,
}
