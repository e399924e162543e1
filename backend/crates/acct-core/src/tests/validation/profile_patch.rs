use crate::validation::account_validator::MSG_PROFILE_UPDATE_FAILED;
use crate::{AccountValidator, CoreError, ProfileUpdate};

use googletest::prelude::*;
use serde_json::{Value, json};

fn patch(body: Value) -> crate::Result<ProfileUpdate> {
    AccountValidator::validate_profile_patch(body.as_object().unwrap())
}

#[test]
fn given_allowed_fields_when_validated_then_update_populated() {
    let update = patch(json!({"first_name": "Ada", "last_name": "King"})).unwrap();

    assert_that!(update.first_name, some(eq("Ada")));
    assert_that!(update.last_name, some(eq("King")));
}

#[test]
fn given_single_field_when_validated_then_other_untouched() {
    let update = patch(json!({"last_name": "King"})).unwrap();

    assert_that!(update.first_name, none());
    assert_that!(update.is_empty(), eq(false));
}

#[test]
fn given_empty_body_when_validated_then_empty_update() {
    assert_that!(patch(json!({})).unwrap().is_empty(), eq(true));
}

#[test]
fn given_protected_field_when_validated_then_invalid_fields_error() {
    let err = patch(json!({"first_name": "Ada", "email": "x@y.z"})).unwrap_err();

    assert!(matches!(err, CoreError::InvalidFields { ref fields, .. } if fields == &["email"]));
}

#[test]
fn given_non_string_or_blank_value_when_validated_then_update_failed() {
    for body in [
        json!({"first_name": 42}),
        json!({"first_name": null}),
        json!({"last_name": ""}),
        json!({"last_name": "   "}),
    ] {
        let err = patch(body).unwrap_err();
        assert_that!(err.client_message(), eq(MSG_PROFILE_UPDATE_FAILED));
    }
}

#[test]
fn given_name_over_limit_when_validated_then_update_failed() {
    assert!(patch(json!({"first_name": "a".repeat(150)})).is_ok());
    assert!(patch(json!({"first_name": "a".repeat(151)})).is_err());
}
