pub mod accounts;
pub mod compensation;
pub mod reset_password_query;
pub mod sign_in_data;
pub mod sign_in_request;
pub mod sign_up_request;
pub mod update_email_request;
pub mod user_dto;
