pub mod new_user;
pub mod profile_field;
pub mod profile_update;
pub mod user;
