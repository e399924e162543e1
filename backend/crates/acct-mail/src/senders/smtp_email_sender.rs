//! SMTP sender for production

use crate::{EmailSender, MailError, OutgoingEmail, Result as MailErrorResult};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::info;

#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    /// 465 for implicit TLS, 587 for STARTTLS
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender, either `addr@host` or `Name <addr@host>`
    pub from_address: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from_address", &self.from_address)
            .finish()
    }
}

pub struct SmtpEmailSender {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Build the transport. No connection is made until the first send.
    #[track_caller]
    pub fn new(settings: SmtpSettings) -> MailErrorResult<Self> {
        let from = parse_mailbox(&settings.from_address)?;

        let builder = if settings.port == 587 {
            SmtpTransport::starttls_relay(&settings.host)
        } else {
            SmtpTransport::relay(&settings.host)
        }
        .map_err(|e| MailError::Transport {
            message: format!("Failed to create SMTP transport: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(settings.username, settings.password))
            .build();

        info!("SMTP transport configured for {}:{}", settings.host, settings.port);

        Ok(Self { transport, from })
    }
}

impl EmailSender for SmtpEmailSender {
    fn send(&self, email: &OutgoingEmail) -> MailErrorResult<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.to)?)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| MailError::Build {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.transport
            .send(&message)
            .map_err(|e| MailError::Transport {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("Email '{}' sent to {}", email.subject, email.to);
        Ok(())
    }
}

#[track_caller]
pub fn parse_mailbox(address: &str) -> MailErrorResult<Mailbox> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}
