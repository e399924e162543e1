mod email;
mod password_rules;
mod profile_patch;
mod sign_up;
