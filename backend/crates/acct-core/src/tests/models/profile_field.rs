use crate::{CoreError, ProfileField};

use std::str::FromStr;

#[test]
fn test_profile_field_as_str() {
    assert_eq!(ProfileField::FirstName.as_str(), "first_name");
    assert_eq!(ProfileField::LastName.as_str(), "last_name");
}

#[test]
fn test_profile_field_from_str() {
    assert_eq!(
        ProfileField::from_str("first_name").unwrap(),
        ProfileField::FirstName
    );
    assert_eq!(
        ProfileField::from_str("last_name").unwrap(),
        ProfileField::LastName
    );
}

#[test]
fn test_profile_field_rejects_protected_columns() {
    for column in ["email", "firebase_uid", "password_hash", "is_active", "id"] {
        let result = ProfileField::from_str(column);
        assert!(
            matches!(result, Err(CoreError::InvalidProfileField { ref value, .. }) if value == column)
        );
    }
}
