use crate::models::user::capitalize;
use crate::{NewUser, User};

use chrono::Utc;
use googletest::prelude::*;

fn sample_user() -> User {
    let now = Utc::now();
    User {
        id: 7,
        firebase_uid: "uid-7".to_string(),
        email: "ada@example.com".to_string(),
        password_hash: "$2b$04$secret".to_string(),
        first_name: "ada".to_string(),
        last_name: "Lovelace".to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn given_lowercase_first_name_when_display_name_then_capitalized() {
    assert_that!(sample_user().display_name(), eq("Ada"));
}

#[test]
fn given_mixed_case_when_capitalize_then_rest_lowercased() {
    assert_that!(capitalize("mARY"), eq("Mary"));
    assert_that!(capitalize("é"), eq("É"));
    assert_that!(capitalize(""), eq(""));
}

#[test]
fn given_user_when_serialized_then_password_hash_is_omitted() {
    let json = serde_json::to_value(sample_user()).unwrap();

    assert_that!(json.get("password_hash"), none());
    assert_that!(json["email"].as_str(), some(eq("ada@example.com")));
}

#[test]
fn given_new_user_when_created_then_active_with_names_kept() {
    let user = NewUser::new(
        "uid-1".to_string(),
        "bob@example.com".to_string(),
        "hash".to_string(),
        "bob".to_string(),
        "Builder".to_string(),
    );

    assert_that!(user.is_active, eq(true));
    assert_that!(user.first_name, eq("bob"));
}
