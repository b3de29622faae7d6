use crate::{
    api::handlers::{
        error::error_response, message_response, valid_email, valid_password, AppState, AuthError,
        Credentials, Message, Operation, MSG_INVALID_EMAIL, MSG_SHORT_PASSWORD,
    },
    store::{email_to_key, User},
};
use axum::{body::Bytes, extract::Extension, http::StatusCode, response::Response};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const MSG_USER_CREATED: &str = "User created successfully";

#[utoipa::path(
    post,
    path= "/signup",
    request_body = Credentials,
    responses (
        (status = 201, description = "User created", body = Message, content_type = "application/json"),
        (status = 400, description = "Missing or invalid fields, or the user already exists", body = Message),
        (status = 500, description = "Document store failure", body = Message),
    ),
    tag= "auth"
)]
// axum handler for signup
#[instrument(skip(state, body))]
pub async fn signup(state: Extension<Arc<AppState>>, body: Bytes) -> Response {
    match create_user(&state, &body).await {
        Ok(()) => message_response(StatusCode::CREATED, MSG_USER_CREATED),
        Err(err) => error_response(Operation::Signup, &err),
    }
}

/// Validate the body and store a new record for its email.
///
/// The existence check and the write are two separate store calls; concurrent
/// signups for the same email can both pass the check, and the last write wins.
///
/// # Errors
/// Returns a validation or conflict error for client mistakes, or a store error.
pub async fn create_user(state: &AppState, body: &[u8]) -> Result<(), AuthError> {
    let (email, password) = Credentials::from_body(body)?.require()?;

    if !valid_email(&email) {
        return Err(AuthError::Validation(MSG_INVALID_EMAIL));
    }

    if !valid_password(&password) {
        return Err(AuthError::Validation(MSG_SHORT_PASSWORD));
    }

    let key = email_to_key(&email);

    if state.find_user(Operation::Signup, &key).await?.is_some() {
        debug!("User already exists: {}", key);
        return Err(AuthError::Conflict);
    }

    state.store().put(&key, &User { email, password }).await?;

    debug!("User created: {}", key);

    Ok(())
}
