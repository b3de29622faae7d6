use crate::{
    api::handlers::{
        error::error_response, message_response, valid_email, AppState, AuthError, Credentials,
        Message, Operation, MSG_INVALID_EMAIL,
    },
    store::email_to_key,
};
use axum::{body::Bytes, extract::Extension, http::StatusCode, response::Response};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const MSG_LOGIN_OK: &str = "Login successful";

#[utoipa::path(
    post,
    path= "/login",
    request_body = Credentials,
    responses (
        (status = 200, description = "Login successful", body = Message, content_type = "application/json"),
        (status = 400, description = "Missing or invalid fields", body = Message),
        (status = 401, description = "Unknown email or wrong password", body = Message),
        (status = 500, description = "Document store failure", body = Message),
    ),
    tag= "auth"
)]
// axum handler for login
#[instrument(skip(state, body))]
pub async fn login(state: Extension<Arc<AppState>>, body: Bytes) -> Response {
    match check_credentials(&state, &body).await {
        Ok(()) => message_response(StatusCode::OK, MSG_LOGIN_OK),
        Err(err) => error_response(Operation::Login, &err),
    }
}

/// Validate the body and compare its password with the stored record.
///
/// # Errors
/// Returns a validation error for malformed input, `InvalidCredentials` when the
/// record is missing or the password differs, or a store error.
pub async fn check_credentials(state: &AppState, body: &[u8]) -> Result<(), AuthError> {
    let (email, password) = Credentials::from_body(body)?.require()?;

    if !valid_email(&email) {
        return Err(AuthError::Validation(MSG_INVALID_EMAIL));
    }

    let key = email_to_key(&email);

    match state.find_user(Operation::Login, &key).await? {
        Some(user) if user.password == password => {
            debug!("Login successful: {}", key);

            Ok(())
        }
        Some(_) => {
            debug!("Password mismatch: {}", key);

            Err(AuthError::InvalidCredentials)
        }
        None => {
            debug!("User not found: {}", key);

            Err(AuthError::InvalidCredentials)
        }
    }
}
