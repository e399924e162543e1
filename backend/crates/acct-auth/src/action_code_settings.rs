use serde::{Deserialize, Serialize};

pub const DEFAULT_ACTION_URL: &str = "https://www.yourwebsite.example/";

/// Where an emailed action link sends the user once the code is applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCodeSettings {
    pub url: String,
    pub handle_code_in_app: bool,
}

impl Default for ActionCodeSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_ACTION_URL.to_string(),
            handle_code_in_app: true,
        }
    }
}
