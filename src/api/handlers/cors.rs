//! Pre-flight and not-found responses.

use super::{cors_headers, message_response};
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

pub const MSG_NOT_FOUND: &str = "Route not found";

/// `OPTIONS` on any path: `204`, no body, CORS headers only.
pub async fn preflight() -> Response {
    (StatusCode::NO_CONTENT, cors_headers()).into_response()
}

pub async fn not_found() -> Response {
    message_response(StatusCode::NOT_FOUND, MSG_NOT_FOUND)
}

/// Router fallback: pre-flight for `OPTIONS`, `404` for everything else.
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight().await
    } else {
        not_found().await
    }
}
