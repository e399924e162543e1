use crate::{OutgoingEmail, Result as MailErrorResult};

/// Delivers a rendered message. Implementations may block.
pub trait EmailSender: Send + Sync {
    fn send(&self, email: &OutgoingEmail) -> MailErrorResult<()>;
}
