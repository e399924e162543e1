pub mod error;
pub mod models;
pub mod password;
pub mod validation;

pub use error::{CoreError, Result};
pub use models::new_user::NewUser;
pub use models::profile_field::ProfileField;
pub use models::profile_update::ProfileUpdate;
pub use models::user::{User, capitalize};
pub use password::PasswordHasher;
pub use validation::account_validator::AccountValidator;
pub use validation::sign_up_fields::SignUpFields;

pub use error_location::ErrorLocation;

#[cfg(test)]
mod tests;
