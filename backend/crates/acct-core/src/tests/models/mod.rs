mod profile_field;
mod user;
