//! Development sender that writes messages to the log instead of mailing them.

use crate::{EmailSender, OutgoingEmail, Result as MailErrorResult};

use log::info;

#[derive(Debug, Default)]
pub struct LogEmailSender;

impl LogEmailSender {
    pub fn new() -> Self {
        Self
    }
}

impl EmailSender for LogEmailSender {
    fn send(&self, email: &OutgoingEmail) -> MailErrorResult<()> {
        info!(
            "Email to {} | subject: {}\n{}",
            email.to, email.subject, email.body
        );
        Ok(())
    }
}
