/// A rendered plain-text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    pub fn verification(to: &str, display_name: &str, link: &str, team_name: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Verify your email address".to_string(),
            body: format!(
                "Hello {},\n\nPlease verify your email address by clicking on the link below:\n\n{}\n\nThanks,\n{}",
                display_name, link, team_name
            ),
        }
    }

    pub fn password_reset(to: &str, display_name: &str, link: &str, team_name: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Reset your password".to_string(),
            body: format!(
                "Hello {},\n\nPlease reset your password by clicking on the link below:\n\n{}\n\nThanks,\n{}",
                display_name, link, team_name
            ),
        }
    }
}
