//! Auth failures and their mapping to HTTP responses.

use super::message_response;
use crate::store::StoreError;
use axum::{http::StatusCode, response::Response};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or out-of-range client input.
    #[error("{0}")]
    Validation(&'static str),
    /// Signup for a key that already holds a record.
    #[error("User already exists")]
    Conflict,
    /// Login with an unknown email or a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The handler an error came from; prefixes store failures in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Signup,
    Login,
}

impl Operation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "Signup",
            Self::Login => "Login",
        }
    }
}

/// Single exit point from an auth error to a response.
pub fn error_response(operation: Operation, err: &AuthError) -> Response {
    let message = match err {
        AuthError::Store(_) => {
            error!("{} error: {}", operation.as_str(), err);

            format!("{} failed: {err}", operation.as_str())
        }
        _ => err.to_string(),
    };

    message_response(err.status(), message)
}
