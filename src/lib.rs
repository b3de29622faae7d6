//! # Authgate
//!
//! `authgate` is a small signup/login API. Each user is stored as a single JSON
//! record in a remote REST document store, keyed by a sanitized form of the
//! email address.
//!
//! ## Endpoints
//!
//! - `POST /signup` validates the credentials and creates the record if the key is free.
//! - `POST /login` compares the supplied password with the stored one.
//! - `GET /` describes the service.
//! - `OPTIONS` on any path answers the CORS pre-flight with `204 No Content`.
//!
//! Every other method/path pair answers `404` with `{"message": "Route not found"}`.
//!
//! ## Storage
//!
//! Records live at `<store-url>/users/<key>.json?auth=<secret>`. The key is the
//! email with `.`, `#`, `$`, `[` and `]` replaced by `_`. Passwords are stored and
//! compared as given; there is no hashing and no session issuance.

pub mod api;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
