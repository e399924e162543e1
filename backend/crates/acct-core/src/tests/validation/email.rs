use crate::AccountValidator;

#[test]
fn test_valid_emails_accepted() {
    for email in ["a@b.co", "first.last@example.com", "x+tag@sub.domain.org"] {
        assert!(AccountValidator::validate_email(email).is_ok(), "{email}");
    }
}

#[test]
fn test_invalid_emails_rejected() {
    for email in [
        "plain",
        "@example.com",
        "user@",
        "user@example",
        "user@.com",
        "user@example.",
        "a@b@c.com",
    ] {
        assert!(AccountValidator::validate_email(email).is_err(), "{email}");
    }
}
