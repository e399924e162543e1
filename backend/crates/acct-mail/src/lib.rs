//! Outgoing account email: action-link messages delivered from a background
//! worker so request handlers never wait on the provider or SMTP.

pub mod error;
pub mod mail_task;
pub mod mail_worker;
pub mod outgoing_email;
pub mod senders;
pub mod task_queue;

pub use error::{MailError, Result};
pub use mail_task::MailTask;
pub use mail_worker::MailWorker;
pub use outgoing_email::OutgoingEmail;
pub use senders::email_sender::EmailSender;
pub use senders::log_email_sender::LogEmailSender;
pub use senders::smtp_email_sender::{SmtpEmailSender, SmtpSettings};
pub use task_queue::TaskQueue;
