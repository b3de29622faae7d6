use crate::GIT_COMMIT_HASH;
use axum::{
    http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderMap, HeaderValue},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MSG_RUNNING: &str = "Auth API Server is running!";

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ServiceInfo {
    message: String,
    name: String,
    version: String,
    endpoints: Vec<String>,
}

#[utoipa::path(
    get,
    path= "/",
    responses (
        (status = 200, description = "Service descriptor", body = ServiceInfo, content_type = "application/json"),
    ),
    tag= "authgate"
)]
// axum handler for the service descriptor
pub async fn root() -> impl IntoResponse {
    let body = Json(ServiceInfo {
        message: MSG_RUNNING.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "POST /signup - Create new user".to_string(),
            "POST /login - User login".to_string(),
        ],
    });

    let short_hash = if GIT_COMMIT_HASH.len() > 7 {
        &GIT_COMMIT_HASH[0..7]
    } else {
        ""
    };

    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    if let Ok(app) = HeaderValue::from_str(&format!(
        "{}:{}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_hash
    )) {
        headers.insert("x-app", app);
    }

    (headers, body)
}
