//! Client for the remote JSON document store holding one record per user.
//!
//! The store speaks a minimal REST contract:
//! `GET <base>/users/<key>.json?auth=<secret>` returns the record or `null`,
//! `PUT` on the same URL replaces it.

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info_span, Instrument};
use url::Url;

const USERS_COLLECTION: &str = "users";
const AUTH_QUERY_PARAM: &str = "auth";

/// Characters the store rejects inside keys.
const RESERVED_KEY_CHARS: [char; 5] = ['.', '#', '$', '[', ']'];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store URL: {0}")]
    Url(String),
    #[error("store request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("store request failed: {status} - {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid store response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for StoreError {
    // reqwest errors carry the request URL, which embeds the secret.
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// The only persisted entity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub password: String,
}

/// Map an email to its storage key by replacing `. # $ [ ]` with `_`.
#[must_use]
pub fn email_to_key(email: &str) -> String {
    email
        .chars()
        .map(|c| if RESERVED_KEY_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

#[derive(Clone)]
pub struct StoreConfig {
    base_url: Url,
    secret: SecretString,
    timeout: Option<Duration>,
}

impl StoreConfig {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute `http`/`https` URL.
    pub fn new(base_url: &str, secret: SecretString) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url).map_err(|e| StoreError::Url(e.to_string()))?;

        match base_url.scheme() {
            "http" | "https" => (),
            scheme => return Err(StoreError::Url(format!("unsupported scheme {scheme}"))),
        }

        if base_url.host().is_none() {
            return Err(StoreError::Url("no host specified".to_string()));
        }

        Ok(Self {
            base_url,
            secret,
            timeout: None,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("secret", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Authenticated point-to-point access to user records. No retries, no caching.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    config: StoreConfig,
}

impl StoreClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let mut builder = Client::builder().user_agent(crate::APP_USER_AGENT);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Build `<base>/users/<key>.json?auth=<secret>`.
    ///
    /// # Errors
    /// Returns an error if the base URL cannot carry path segments.
    pub fn user_url(&self, key: &str) -> Result<Url, StoreError> {
        let mut url = self.config.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| StoreError::Url("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(USERS_COLLECTION)
            .push(&format!("{key}.json"));

        url.query_pairs_mut()
            .append_pair(AUTH_QUERY_PARAM, self.config.secret.expose_secret());

        Ok(url)
    }

    /// Read the record stored under `key`; `Ok(None)` when the store answers
    /// `null` or an empty body.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an undecodable body.
    pub async fn get(&self, key: &str) -> Result<Option<User>, StoreError> {
        let url = self.user_url(key)?;

        let span = info_span!("store.request", http.method = "GET", store.key = key);
        let response = self.client.get(url).send().instrument(span).await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("store read failed: {} {}", status, body);
            return Err(StoreError::Status { status, body });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        Ok(serde_json::from_str::<Option<User>>(&body)?)
    }

    /// Replace the record stored under `key`. The store echoes the record back;
    /// the echo must be JSON when present.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or a
    /// non-JSON success body.
    pub async fn put(&self, key: &str, user: &User) -> Result<(), StoreError> {
        let url = self.user_url(key)?;

        let span = info_span!("store.request", http.method = "PUT", store.key = key);
        let response = self
            .client
            .put(url)
            .json(user)
            .send()
            .instrument(span)
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("store write failed: {} {}", status, body);
            return Err(StoreError::Status { status, body });
        }

        if !body.trim().is_empty() {
            serde_json::from_str::<serde_json::Value>(&body)?;
        }

        Ok(())
    }
}
