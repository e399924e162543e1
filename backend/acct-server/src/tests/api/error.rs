use crate::{ApiError, ErrorKind};

use acct_auth::AuthError;
use acct_core::CoreError;
use acct_db::DbError;
use acct_mail::MailError;

use std::panic::Location;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::prelude::*;
use http_body_util::BodyExt;
use serde_json::Value;

#[track_caller]
fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

async fn render(error: ApiError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_not_found_without_message_when_rendered_then_uses_policy_default() {
    // When
    let (status, json) = render(ApiError::not_found()).await;

    // Then
    assert_that!(status, eq(StatusCode::NOT_FOUND));
    assert_that!(json["status"].as_str(), some(eq("failed")));
    assert_that!(json["code"].as_str(), some(eq("NOT_FOUND")));
    assert_that!(json["message"].as_str(), some(eq("User does not exist.")));
    assert_that!(json.get("data"), none());
}

#[tokio::test]
async fn given_not_found_with_message_when_rendered_then_uses_override() {
    // Given
    let error = ApiError::NotFound {
        message: Some("User does not exist on firebase.".to_string()),
        location: here(),
    };

    // When
    let (_, json) = render(error).await;

    // Then
    assert_that!(
        json["message"].as_str(),
        some(eq("User does not exist on firebase."))
    );
}

#[tokio::test]
async fn given_invalid_fields_when_rendered_then_lists_fields_in_data() {
    // Given
    let error = ApiError::from(CoreError::InvalidFields {
        fields: vec!["role".to_string()],
        location: here(),
    });

    // When
    let (status, json) = render(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["code"].as_str(), some(eq("VALIDATION_ERROR")));
    assert_that!(json["data"]["fields"][0].as_str(), some(eq("role")));
    assert_that!(
        json["message"].as_str(),
        some(contains_substring("Invalid field(s): role"))
    );
}

#[tokio::test]
async fn given_internal_error_when_rendered_then_detail_is_hidden() {
    // Given
    let error = ApiError::from(DbError::Initialization {
        message: "disk I/O error at /var/lib/accounts.db".to_string(),
        location: here(),
    });

    // When
    let (status, json) = render(error).await;

    // Then
    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_that!(json["message"].as_str(), some(eq("Internal server error.")));
    assert_that!(json.to_string(), not(contains_substring("accounts.db")));
}

#[tokio::test]
async fn given_invalid_credentials_when_rendered_then_provider_reason_is_hidden() {
    // Given
    let error = ApiError::InvalidCredentials {
        message: "INVALID_LOGIN_CREDENTIALS".to_string(),
        location: here(),
    };

    // When
    let (status, json) = render(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(
        json["message"].as_str(),
        some(eq("Invalid email or password."))
    );
}

#[tokio::test]
async fn given_provider_rejection_with_code_when_rendered_then_message_is_code() {
    // Given
    let error = ApiError::ProviderRejected {
        message: Some("EMAIL_EXISTS".to_string()),
        location: here(),
    };

    // When
    let (status, json) = render(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["code"].as_str(), some(eq("PROVIDER_REJECTED")));
    assert_that!(json["message"].as_str(), some(eq("EMAIL_EXISTS")));
}

#[tokio::test]
async fn given_task_dispatch_when_rendered_then_uses_handler_message() {
    // Given
    let cause = MailError::QueueFull { location: here() };
    let error = ApiError::task_dispatch(
        "Password reset link could not be sent; Please try again.",
        &cause,
    );

    // When
    let (status, json) = render(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["code"].as_str(), some(eq("TASK_DISPATCH_FAILED")));
    assert_that!(
        json["message"].as_str(),
        some(eq("Password reset link could not be sent; Please try again."))
    );
}

#[test]
fn given_each_auth_error_when_converted_then_maps_to_matching_kind() {
    let cases = [
        (AuthError::NoAuthToken { location: here() }, ErrorKind::NoAuthToken),
        (
            AuthError::InvalidAuthToken {
                message: "expired".to_string(),
                location: here(),
            },
            ErrorKind::InvalidAuthToken,
        ),
        (
            AuthError::EmailVerification { location: here() },
            ErrorKind::EmailNotVerified,
        ),
        (
            AuthError::IdentityIntegrity {
                message: "no local record".to_string(),
                location: here(),
            },
            ErrorKind::IdentityIntegrity,
        ),
    ];

    for (auth_error, expected) in cases {
        assert_that!(ApiError::from(auth_error).kind(), eq(expected));
    }
}

#[test]
fn given_validation_core_error_when_converted_then_keeps_message_and_field() {
    // Given
    let core = CoreError::Validation {
        message: "Enter a valid email address.".to_string(),
        field: Some("email".to_string()),
        location: here(),
    };

    // When
    let api = ApiError::from(core);

    // Then
    assert_that!(api.kind(), eq(ErrorKind::Validation));
    assert_that!(api.client_message(), eq("Enter a valid email address."));
}

#[test]
fn given_optional_messages_when_displayed_then_both_forms_format() {
    // Given
    let bare = ApiError::not_found();
    let coded = ApiError::ProviderRejected {
        message: Some("EMAIL_EXISTS".to_string()),
        location: here(),
    };

    // When
    let bare_text = bare.to_string();
    let coded_text = coded.to_string();

    // Then
    assert_that!(bare_text, starts_with("Resource not found: None"));
    assert_that!(coded_text, contains_substring("\"EMAIL_EXISTS\""));
}
