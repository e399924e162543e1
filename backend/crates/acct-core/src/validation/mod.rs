pub mod account_validator;
pub mod sign_up_fields;
