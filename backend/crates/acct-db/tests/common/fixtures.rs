use acct_core::NewUser;

/// Creates a NewUser with a unique uid and email derived from `tag`
pub fn create_test_new_user(tag: &str) -> NewUser {
    NewUser::new(
        format!("uid-{}", tag),
        format!("{}@example.com", tag),
        "$2b$04$placeholderhashplaceholderhashplaceholderhash".to_string(),
        tag.to_string(),
        "Tester".to_string(),
    )
}
