//! API handlers and shared utilities for authgate.
//!
//! This module organizes the route handlers and provides the pieces they share:
//! credential validation, the `{"message": ...}` envelope, and CORS headers.

pub mod cors;
pub mod error;
pub mod root;
pub mod state;
pub mod user_login;
pub mod user_signup;

pub use self::error::{AuthError, Operation};
pub use self::state::{AppState, LookupPolicy};

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderName, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

pub const MSG_MISSING_FIELDS: &str = "Email and password are required";
pub const MSG_INVALID_EMAIL: &str = "Invalid email format";
pub const MSG_SHORT_PASSWORD: &str = "Password must be at least 6 characters";
pub const MSG_INVALID_BODY: &str = "Invalid request body";

const MIN_PASSWORD_UNITS: usize = 6;

/// Lightweight email shape check: `local@domain.tld`, no whitespace, single `@`.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Signup passwords need at least six UTF-16 code units; login accepts any
/// non-empty one. Characters outside the BMP count twice.
pub fn valid_password(password: &str) -> bool {
    password.encode_utf16().count() >= MIN_PASSWORD_UNITS
}

/// Response envelope shared by every JSON response except `GET /`.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

/// Signup and login request body. Both fields are required at validation time;
/// they are optional here so a missing field is reported as such instead of as
/// a malformed body.
#[derive(ToSchema, Deserialize, Default)]
pub struct Credentials {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    /// Decode a request body regardless of its `Content-Type`.
    ///
    /// # Errors
    /// Returns a validation error if the body is not a JSON object with string fields.
    pub fn from_body(body: &[u8]) -> Result<Self, AuthError> {
        serde_json::from_slice(body).map_err(|e| {
            debug!("Invalid request body: {}", e);

            AuthError::Validation(MSG_INVALID_BODY)
        })
    }

    /// Return `(email, password)` if both are present and non-empty.
    ///
    /// # Errors
    /// Returns a validation error if either field is missing or empty.
    pub fn require(self) -> Result<(String, String), AuthError> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => Err(AuthError::Validation(MSG_MISSING_FIELDS)),
        }
    }
}

/// CORS headers attached to signup, login, 404 and pre-flight responses.
#[must_use]
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        (
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ),
        (
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ),
    ]
}

/// `{"message": ...}` with `Content-Type: application/json` and CORS headers.
pub fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        cors_headers(),
        Json(Message {
            message: message.into(),
        }),
    )
        .into_response()
}
