use crate::AccountValidator;
use crate::validation::account_validator::{MSG_PASSWORD_TOO_SHORT, MSG_PASSWORD_TOO_WEAK};

use googletest::prelude::*;

#[test]
fn given_seven_characters_when_validated_then_too_short() {
    let err = AccountValidator::validate_password("Ab1!xyz").unwrap_err();

    assert_that!(err.client_message(), eq(MSG_PASSWORD_TOO_SHORT));
}

#[test]
fn given_eight_characters_with_all_classes_when_validated_then_ok() {
    assert!(AccountValidator::validate_password("Ab1!xyzw").is_ok());
}

#[test]
fn given_length_counted_in_characters_when_multibyte_then_short() {
    // 7 characters, more than 8 bytes
    let err = AccountValidator::validate_password("Ab1!ééé").unwrap_err();

    assert_that!(err.client_message(), eq(MSG_PASSWORD_TOO_SHORT));
}

#[test]
fn given_missing_class_when_validated_then_too_weak() {
    for password in ["abcdefg1!", "ABCDEFG1!", "Abcdefgh!", "Abcdefgh1"] {
        let err = AccountValidator::validate_password(password).unwrap_err();
        assert_that!(err.client_message(), eq(MSG_PASSWORD_TOO_WEAK));
    }
}

#[test]
fn given_backslash_or_hyphen_as_symbol_when_validated_then_ok() {
    assert!(AccountValidator::validate_password("Abcdefg1\\").is_ok());
    assert!(AccountValidator::validate_password("Abcdefg1-").is_ok());
}

#[test]
fn given_unlisted_symbol_when_validated_then_too_weak() {
    assert!(AccountValidator::validate_password("Abcdefg1=").is_err());
    assert!(AccountValidator::validate_password("Abcdefg1 ").is_err());
}
