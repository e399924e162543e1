use std::fmt;

/// A unit of background mail work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTask {
    VerifyEmail { email: String, display_name: String },
    ResetPassword { email: String, display_name: String },
}

impl MailTask {
    pub fn email(&self) -> &str {
        match self {
            Self::VerifyEmail { email, .. } | Self::ResetPassword { email, .. } => email,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::VerifyEmail { display_name, .. } | Self::ResetPassword { display_name, .. } => {
                display_name
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::VerifyEmail { .. } => "verify_email",
            Self::ResetPassword { .. } => "reset_password",
        }
    }
}

impl fmt::Display for MailTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.kind(), self.email())
    }
}
