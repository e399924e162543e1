use crate::{CoreError, ProfileField, ProfileUpdate, Result as CoreErrorResult, SignUpFields};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde_json::{Map, Value};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_NAME_LENGTH: usize = 150;
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+{}[]:;<>,.?~\\-";

pub const MSG_ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long.";
pub const MSG_PASSWORD_TOO_WEAK: &str = "Password must contain at least one uppercase letter, one lowercase letter, one digit, and one special character.";
pub const MSG_EMAIL_UPDATE_REQUIRED: &str = "new email and firebase uid are required.";
pub const MSG_PROFILE_UPDATE_FAILED: &str = "User update failed.";
pub const MSG_NAME_TOO_LONG: &str = "Ensure this field has no more than 150 characters.";

/// Shape checks applied before any call to the identity provider
pub struct AccountValidator;

impl AccountValidator {
    /// Validate a sign-up request. Checks run in a fixed order and the first
    /// failure wins: presence, email shape, password length, password classes,
    /// name length. The returned email is lower-cased, as the provider stores it.
    #[track_caller]
    pub fn validate_sign_up(
        email: Option<&str>,
        password: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> CoreErrorResult<SignUpFields> {
        let (Some(email), Some(password), Some(first_name), Some(last_name)) = (
            non_empty(email),
            non_empty(password),
            non_empty(first_name),
            non_empty(last_name),
        ) else {
            return Err(validation(MSG_ALL_FIELDS_REQUIRED, None));
        };

        Self::validate_email(email)?;
        Self::validate_password(password)?;

        for (field, value) in [("first_name", first_name), ("last_name", last_name)] {
            if value.chars().count() > MAX_NAME_LENGTH {
                return Err(validation(MSG_NAME_TOO_LONG, Some(field)));
            }
        }

        Ok(SignUpFields {
            email: email.to_lowercase(),
            password: password.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    /// `local@domain.tld`: exactly one `@`, a non-empty local part, and a
    /// domain with a dot that has at least one character on each side.
    #[track_caller]
    pub fn validate_email(email: &str) -> CoreErrorResult<()> {
        let mut parts = email.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(validation(MSG_INVALID_EMAIL, Some("email")));
        };

        let domain_ok = domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());

        if local.is_empty() || !domain_ok {
            return Err(validation(MSG_INVALID_EMAIL, Some("email")));
        }

        Ok(())
    }

    #[track_caller]
    pub fn validate_password(password: &str) -> CoreErrorResult<()> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(validation(MSG_PASSWORD_TOO_SHORT, Some("password")));
        }

        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

        if !(has_upper && has_lower && has_digit && has_symbol) {
            return Err(validation(MSG_PASSWORD_TOO_WEAK, Some("password")));
        }

        Ok(())
    }

    /// Validate an email-change request body, returning `(email, firebase_uid)`.
    #[track_caller]
    pub fn validate_email_update<'a>(
        email: Option<&'a str>,
        firebase_uid: Option<&'a str>,
    ) -> CoreErrorResult<(&'a str, &'a str)> {
        let (Some(email), Some(firebase_uid)) = (non_empty(email), non_empty(firebase_uid)) else {
            return Err(validation(MSG_EMAIL_UPDATE_REQUIRED, None));
        };

        Self::validate_email(email)?;

        Ok((email, firebase_uid))
    }

    /// Validate a profile patch. Every key must be an allowed field; unknown
    /// keys are all reported together.
    #[track_caller]
    pub fn validate_profile_patch(body: &Map<String, Value>) -> CoreErrorResult<ProfileUpdate> {
        let invalid: Vec<String> = body
            .keys()
            .filter(|key| ProfileField::from_str(key).is_err())
            .cloned()
            .collect();

        if !invalid.is_empty() {
            return Err(CoreError::InvalidFields {
                fields: invalid,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut update = ProfileUpdate::default();
        for field in ProfileField::ALL {
            let Some(value) = body.get(field.as_str()) else {
                continue;
            };

            let value = match value.as_str() {
                Some(s) if !s.trim().is_empty() && s.chars().count() <= MAX_NAME_LENGTH => {
                    s.to_string()
                }
                _ => {
                    return Err(validation(MSG_PROFILE_UPDATE_FAILED, Some(field.as_str())));
                }
            };

            match field {
                ProfileField::FirstName => update.first_name = Some(value),
                ProfileField::LastName => update.last_name = Some(value),
            }
        }

        Ok(update)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[track_caller]
fn validation(message: &str, field: Option<&str>) -> CoreError {
    CoreError::Validation {
        message: message.to_string(),
        field: field.map(String::from),
        location: ErrorLocation::from(Location::caller()),
    }
}
