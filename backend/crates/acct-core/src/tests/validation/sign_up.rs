use crate::AccountValidator;
use crate::validation::account_validator::{
    MAX_NAME_LENGTH, MSG_ALL_FIELDS_REQUIRED, MSG_EMAIL_UPDATE_REQUIRED, MSG_INVALID_EMAIL,
    MSG_NAME_TOO_LONG, MSG_PASSWORD_TOO_SHORT,
};

use googletest::prelude::*;

#[test]
fn given_all_fields_when_validated_then_returns_owned_fields() {
    let fields = AccountValidator::validate_sign_up(
        Some("ada@example.com"),
        Some("Str0ng!Pass"),
        Some("ada"),
        Some("Lovelace"),
    )
    .unwrap();

    assert_that!(fields.email, eq("ada@example.com"));
    assert_that!(fields.first_name, eq("ada"));
}

#[test]
fn given_missing_or_empty_field_when_validated_then_all_fields_required() {
    let cases = [
        (None, Some("Str0ng!Pass"), Some("a"), Some("b")),
        (Some("a@b.co"), Some(""), Some("a"), Some("b")),
        (Some("a@b.co"), Some("Str0ng!Pass"), None, Some("b")),
        (Some("a@b.co"), Some("Str0ng!Pass"), Some("a"), Some("")),
    ];

    for (email, password, first, last) in cases {
        let err = AccountValidator::validate_sign_up(email, password, first, last).unwrap_err();
        assert_that!(err.client_message(), eq(MSG_ALL_FIELDS_REQUIRED));
    }
}

#[test]
fn given_bad_email_and_short_password_when_validated_then_email_error_wins() {
    let err = AccountValidator::validate_sign_up(Some("bad"), Some("short"), Some("a"), Some("b"))
        .unwrap_err();

    assert_that!(err.client_message(), eq(MSG_INVALID_EMAIL));
    assert_that!(err.fields(), elements_are![eq("email")]);
}

#[test]
fn given_good_email_and_short_password_when_validated_then_password_error() {
    let err = AccountValidator::validate_sign_up(Some("a@b.co"), Some("Ab1!"), Some("a"), Some("b"))
        .unwrap_err();

    assert_that!(err.client_message(), eq(MSG_PASSWORD_TOO_SHORT));
}

#[test]
fn given_email_update_without_uid_when_validated_then_required_error() {
    let err = AccountValidator::validate_email_update(Some("a@b.co"), None).unwrap_err();

    assert_that!(err.client_message(), eq(MSG_EMAIL_UPDATE_REQUIRED));
}

#[test]
fn given_email_update_with_bad_email_when_validated_then_invalid_email() {
    let err = AccountValidator::validate_email_update(Some("nope"), Some("uid-1")).unwrap_err();

    assert_that!(err.client_message(), eq(MSG_INVALID_EMAIL));
}

#[test]
fn given_last_name_over_limit_when_validated_then_name_too_long_on_that_field() {
    let long = "x".repeat(MAX_NAME_LENGTH + 1);

    let err = AccountValidator::validate_sign_up(
        Some("ada@example.com"),
        Some("Str0ng!Pass"),
        Some("Ada"),
        Some(&long),
    )
    .unwrap_err();

    assert_that!(err.client_message(), eq(MSG_NAME_TOO_LONG));
    assert_that!(err.fields(), elements_are![eq("last_name")]);
}

#[test]
fn given_names_at_limit_when_validated_then_accepted() {
    let at_limit = "é".repeat(MAX_NAME_LENGTH);

    let result = AccountValidator::validate_sign_up(
        Some("ada@example.com"),
        Some("Str0ng!Pass"),
        Some(&at_limit),
        Some(&at_limit),
    );

    assert_that!(result.is_ok(), eq(true));
}

#[test]
fn given_mixed_case_email_when_validated_then_email_lowercased() {
    let fields = AccountValidator::validate_sign_up(
        Some("Ada@Example.COM"),
        Some("Str0ng!Pass"),
        Some("Ada"),
        Some("Lovelace"),
    )
    .unwrap();

    assert_that!(fields.email, eq("ada@example.com"));
}
