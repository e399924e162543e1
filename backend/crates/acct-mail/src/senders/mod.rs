pub mod email_sender;
pub mod log_email_sender;
pub mod smtp_email_sender;
