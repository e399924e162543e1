//! Account REST API handlers
//!
//! Each operation validates the request shape, calls the identity provider,
//! then mirrors the result locally. When the local step fails after the
//! provider step succeeded, the provider change is compensated once.

use crate::api::accounts::compensation::compensate;
use crate::{
    ApiError, ApiResponse, ApiResult, AppState, AuthenticatedUser, ResetPasswordQuery,
    SignInData, SignInRequest, SignUpRequest, UpdateEmailRequest, UserDto,
};

use acct_auth::ProviderError;
use acct_core::{AccountValidator, NewUser, PasswordHasher, User, capitalize};
use acct_mail::MailTask;

use std::panic::Location;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use error_location::ErrorLocation;
use log::{info, warn};
use serde_json::{Map, Value};

pub const MSG_USER_CREATED: &str = "User created successfully.";
pub const MSG_USER_SIGNUP_FAILED: &str = "User signup failed.";
pub const MSG_VERIFICATION_NOT_SENT: &str =
    "Email verification link could not be sent; Please try again.";
pub const MSG_LOGGED_IN: &str = "User logged in successfully.";
pub const MSG_USER_RETRIEVED: &str = "User retrieved successfully.";
pub const MSG_USER_UPDATED: &str = "User updated successfully.";
pub const MSG_NOT_ON_PROVIDER: &str = "User does not exist on firebase.";
pub const MSG_EMAIL_UPDATED: &str = "User email updated successfully.";
pub const MSG_EMAIL_IN_USE: &str = "Email address is already in use.";
pub const MSG_RESET_SENT: &str = "Password reset link sent successfully.";
pub const MSG_RESET_NOT_SENT: &str = "Password reset link could not be sent; Please try again.";
pub const MSG_INVALID_USER_ID: &str = "Invalid user id.";

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/v1/users/sign-up
///
/// Create the provider account, queue the verification email, then insert
/// the local record.
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserDto>>)> {
    let Json(request) = payload?;
    let fields = AccountValidator::validate_sign_up(
        request.email.as_deref(),
        request.password.as_deref(),
        request.first_name.as_deref(),
        request.last_name.as_deref(),
    )?;

    let session = state
        .provider
        .create_account(&fields.email, &fields.password)
        .await
        .map_err(|e| provider_rejected(&e))?;
    let uid = session.local_id.clone();
    info!("Provider account {} created for {}", uid, fields.email);

    let task = MailTask::VerifyEmail {
        email: fields.email.clone(),
        display_name: capitalize(&fields.first_name),
    };
    if let Err(e) = state.mail_queue.enqueue(task) {
        compensate(
            "delete provider account",
            &uid,
            state.provider.delete_account(&uid),
        )
        .await;
        return Err(ApiError::task_dispatch(MSG_VERIFICATION_NOT_SENT, &e));
    }

    let inserted = match hash_password(state.hasher, &fields.password).await {
        Ok(password_hash) => {
            let new_user = NewUser::new(
                uid.clone(),
                fields.email,
                password_hash,
                fields.first_name,
                fields.last_name,
            );
            state.users.create(&new_user).await.map_err(ApiError::from)
        }
        Err(e) => Err(e),
    };

    let user = match inserted {
        Ok(user) => user,
        Err(e) => {
            warn!("Local record for {} could not be stored: {}", uid, e);
            compensate(
                "delete provider account by token",
                &uid,
                state.provider.delete_account_with_token(&session.id_token),
            )
            .await;
            return Err(ApiError::validation(MSG_USER_SIGNUP_FAILED));
        }
    };

    info!("User {} created ({})", user.id, user.firebase_uid);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MSG_USER_CREATED, user.into())),
    ))
}

/// POST /api/v1/users/sign-in
///
/// Sign in with the provider and return its tokens with the local record.
/// The record is resolved by the provider's subject identifier, not the
/// submitted email. A local hash that does not match the accepted password
/// is rewritten.
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<SignInData>>> {
    let Json(request) = payload?;
    let (Some(email), Some(password)) = (
        request.email.filter(|e| !e.is_empty()),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(invalid_credentials("email or password missing"));
    };

    let session = state
        .provider
        .sign_in(&email, &password)
        .await
        .map_err(|e| invalid_credentials(e.to_string()))?;

    let Some(user) = state.users.find_by_firebase_uid(&session.local_id).await? else {
        warn!(
            "Provider accepted {} but no local record exists",
            session.local_id
        );
        compensate(
            "delete provider account by token",
            &session.local_id,
            state.provider.delete_account_with_token(&session.id_token),
        )
        .await;
        return Err(ApiError::not_found());
    };

    if !verify_password(state.hasher, &password, &user.password_hash).await? {
        info!("Refreshing stored password hash for user {}", user.id);
        let password_hash = hash_password(state.hasher, &password).await?;
        state
            .users
            .update_password_hash(user.id, &password_hash)
            .await?;
    }

    Ok(Json(ApiResponse::success(
        MSG_LOGGED_IN,
        SignInData::new(session, user.into()),
    )))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    AuthenticatedUser(caller): AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let user = find_owned_user(&state, &id, &caller).await?;

    Ok(Json(ApiResponse::success(MSG_USER_RETRIEVED, user.into())))
}

/// PATCH /api/v1/users/{id}
///
/// Only `first_name` and `last_name` may be changed. Any other key rejects
/// the whole request before storage is touched.
pub async fn update_user(
    AuthenticatedUser(caller): AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let user = find_owned_user(&state, &id, &caller).await?;
    let Json(body) = payload?;

    let update = AccountValidator::validate_profile_patch(&body)?;
    let updated = state
        .users
        .update_profile(user.id, &update)
        .await?
        .ok_or_else(ApiError::not_found)?;

    info!("User {} profile updated", updated.id);
    Ok(Json(ApiResponse::success(MSG_USER_UPDATED, updated.into())))
}

/// DELETE /api/v1/users/{id}
///
/// The provider account goes first; if that fails the local record stays.
pub async fn delete_user(
    AuthenticatedUser(caller): AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let user = find_owned_user(&state, &id, &caller).await?;

    if let Err(e) = state.provider.delete_account(&user.firebase_uid).await {
        warn!(
            "Provider deletion of {} failed, keeping local record {}: {}",
            user.firebase_uid, user.id, e
        );
        return Err(ApiError::NotFound {
            message: Some(MSG_NOT_ON_PROVIDER.to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if !state.users.delete(user.id).await? {
        warn!("Local record {} was already gone", user.id);
    }

    info!("User {} deleted ({})", user.id, user.firebase_uid);
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/users/update-email
pub async fn update_email(
    AuthenticatedUser(caller): AuthenticatedUser,
    State(state): State<AppState>,
    payload: Result<Json<UpdateEmailRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let Json(request) = payload?;
    let (email, uid) = AccountValidator::validate_email_update(
        request.email.as_deref(),
        request.firebase_uid.as_deref(),
    )?;

    if uid != caller.firebase_uid {
        warn!(
            "User {} attempted to change the email of {}",
            caller.firebase_uid, uid
        );
        return Err(ApiError::not_found());
    }

    if let Err(e) = state.provider.update_email(uid, email).await {
        warn!("Provider email update for {} failed: {}", uid, e);
        return Err(ApiError::not_found());
    }

    match state.users.update_email_by_uid(uid, email).await {
        Ok(true) => {
            info!("User {} email updated", caller.id);
            Ok(Json(ApiResponse::message(MSG_EMAIL_UPDATED)))
        }
        Ok(false) => {
            compensate(
                "delete provider account",
                uid,
                state.provider.delete_account(uid),
            )
            .await;
            Err(ApiError::not_found())
        }
        Err(e) => {
            compensate(
                "restore provider email",
                uid,
                state.provider.update_email(uid, &caller.email),
            )
            .await;
            if e.is_conflict() {
                Err(ApiError::Validation {
                    message: MSG_EMAIL_IN_USE.to_string(),
                    fields: vec!["email".to_string()],
                    location: ErrorLocation::from(Location::caller()),
                })
            } else {
                Err(e.into())
            }
        }
    }
}

/// GET /api/v1/users/reset-password?email=
///
/// Queues the reset email and returns immediately.
pub async fn reset_password(
    State(state): State<AppState>,
    query: Result<Query<ResetPasswordQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let Query(query) = query?;
    let Some(email) = query.email.filter(|e| !e.is_empty()) else {
        return Err(ApiError::not_found());
    };

    AccountValidator::validate_email(&email)?;

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(ApiError::not_found)?;

    let task = MailTask::ResetPassword {
        display_name: user.display_name(),
        email: user.email,
    };
    state
        .mail_queue
        .enqueue(task)
        .map_err(|e| ApiError::task_dispatch(MSG_RESET_NOT_SENT, &e))?;

    Ok(Json(ApiResponse::message(MSG_RESET_SENT)))
}

// =============================================================================
// Helpers
// =============================================================================

/// The row with this id, only if it belongs to the caller
async fn find_owned_user(state: &AppState, id: &str, caller: &User) -> ApiResult<User> {
    let id: i64 = id.parse().map_err(|_| ApiError::Validation {
        message: MSG_INVALID_USER_ID.to_string(),
        fields: vec!["id".to_string()],
        location: ErrorLocation::from(Location::caller()),
    })?;

    state
        .users
        .find_by_id_and_uid(id, &caller.firebase_uid)
        .await?
        .ok_or_else(ApiError::not_found)
}

/// bcrypt is CPU-bound, so it runs off the async workers
async fn hash_password(hasher: PasswordHasher, password: &str) -> ApiResult<String> {
    let password = password.to_string();
    let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| ApiError::internal(format!("Password hashing task failed: {}", e)))??;
    Ok(hash)
}

async fn verify_password(hasher: PasswordHasher, password: &str, hash: &str) -> ApiResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| ApiError::internal(format!("Password check task failed: {}", e)))
}

#[track_caller]
fn provider_rejected(e: &ProviderError) -> ApiError {
    warn!("Provider rejected account creation: {}", e);
    ApiError::ProviderRejected {
        message: e.provider_code().map(str::to_string),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn invalid_credentials(detail: impl Into<String>) -> ApiError {
    ApiError::InvalidCredentials {
        message: detail.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}
