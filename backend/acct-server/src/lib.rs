pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;


pub use api::{
    accounts::{
        accounts::{
            delete_user, get_user, reset_password, sign_in, sign_up, update_email, update_user,
        },
        reset_password_query::ResetPasswordQuery,
        sign_in_data::SignInData,
        sign_in_request::SignInRequest,
        sign_up_request::SignUpRequest,
        update_email_request::UpdateEmailRequest,
        user_dto::UserDto,
    },
    envelope::{ApiErrorResponse, ApiResponse, FieldErrors},
    error::ApiError,
    error::Result as ApiResult,
    error_policy::{ErrorKind, ErrorPolicy},
    extractors::authenticated_user::AuthenticatedUser,
};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};

pub use crate::routes::build_router;
