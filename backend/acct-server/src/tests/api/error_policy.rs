use crate::ErrorKind;

use std::collections::HashSet;

use axum::http::StatusCode;
use googletest::prelude::*;

#[test]
fn given_every_kind_when_policy_looked_up_then_codes_are_unique() {
    // When
    let codes: HashSet<&str> = ErrorKind::ALL.iter().map(|k| k.policy().code).collect();

    // Then
    assert_that!(codes.len(), eq(ErrorKind::ALL.len()));
}

#[test]
fn given_auth_kinds_when_policy_looked_up_then_unauthorized() {
    for kind in [ErrorKind::NoAuthToken, ErrorKind::InvalidAuthToken] {
        assert_that!(kind.policy().status, eq(StatusCode::UNAUTHORIZED));
    }
}

#[test]
fn given_identity_integrity_when_policy_looked_up_then_server_error_with_original_message() {
    // When
    let policy = ErrorKind::IdentityIntegrity.policy();

    // Then
    assert_that!(policy.status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_that!(
        policy.message,
        eq("The user provided with auth token is not linked to a local account.")
    );
}

#[test]
fn given_email_not_verified_when_policy_looked_up_then_bad_request() {
    // When
    let policy = ErrorKind::EmailNotVerified.policy();

    // Then
    assert_that!(policy.status, eq(StatusCode::BAD_REQUEST));
    assert_that!(
        policy.message,
        eq("Email not verified. please verify your email address.")
    );
}

#[test]
fn given_not_found_when_policy_looked_up_then_user_does_not_exist() {
    // When
    let policy = ErrorKind::NotFound.policy();

    // Then
    assert_that!(policy.status, eq(StatusCode::NOT_FOUND));
    assert_that!(policy.message, eq("User does not exist."));
}

#[test]
fn given_client_side_kinds_when_policy_looked_up_then_bad_request() {
    for kind in [
        ErrorKind::Validation,
        ErrorKind::InvalidCredentials,
        ErrorKind::ProviderRejected,
        ErrorKind::TaskDispatch,
    ] {
        assert_that!(kind.policy().status, eq(StatusCode::BAD_REQUEST));
    }
}
