//! In-process stand-in for the remote document store.
//!
//! Serves `GET`/`PUT /users/<key>.json?auth=<secret>` from a map on an
//! ephemeral port so tests exercise the real HTTP client.

#![allow(dead_code, clippy::unwrap_used)]

use anyhow::Result;
use authgate::{
    api::{
        self,
        handlers::{AppState, LookupPolicy},
    },
    store::{StoreClient, StoreConfig},
};
use axum::{
    body::{to_bytes, Body},
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use secrecy::SecretString;
use serde_json::Value;
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

#[derive(Clone, Default)]
struct Shared {
    records: Arc<Mutex<HashMap<String, Value>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    empty_reads: Arc<AtomicBool>,
    text_writes: Arc<AtomicBool>,
}

pub struct FakeStore {
    addr: SocketAddr,
    shared: Shared,
}

impl FakeStore {
    pub async fn start() -> Result<Self> {
        let shared = Shared::default();

        let app = Router::new()
            .route("/users/:file", get(read_record).put(write_record))
            .with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app.into_make_service()).await;
        });

        Ok(Self { addr, shared })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self, secret: &str) -> StoreClient {
        let config = StoreConfig::new(&self.base_url(), SecretString::from(secret)).unwrap();
        StoreClient::new(config).unwrap()
    }

    pub fn app(&self, lookup: LookupPolicy) -> Router {
        api::router(Arc::new(AppState::new(self.client(SECRET), lookup)))
    }

    pub fn insert(&self, key: &str, value: Value) {
        self.shared
            .records
            .lock()
            .unwrap()
            .insert(key.to_string(), value);
    }

    pub fn record(&self, key: &str) -> Option<Value> {
        self.shared.records.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.shared.records.lock().unwrap().len()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.shared.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.shared.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Answer reads of missing records with `200` and an empty body instead of `null`.
    pub fn empty_reads(&self, empty: bool) {
        self.shared.empty_reads.store(empty, Ordering::SeqCst);
    }

    /// Store writes but echo them back as plain text instead of JSON.
    pub fn text_writes(&self, text: bool) {
        self.shared.text_writes.store(text, Ordering::SeqCst);
    }
}

fn check(query: &HashMap<String, String>, fail: &AtomicBool) -> Option<Response> {
    if query.get("auth").map(String::as_str) != Some(SECRET) {
        return Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": "Permission denied"})),
            )
                .into_response(),
        );
    }

    if fail.load(Ordering::SeqCst) {
        return Some((StatusCode::SERVICE_UNAVAILABLE, "store unavailable").into_response());
    }

    None
}

fn key_of(file: &str) -> Option<&str> {
    file.strip_suffix(".json")
}

async fn read_record(
    State(shared): State<Shared>,
    Path(file): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Some(response) = check(&query, &shared.fail_reads) {
        return response;
    }

    let Some(key) = key_of(&file) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let record = shared.records.lock().unwrap().get(key).cloned();

    match record {
        Some(record) => Json(record).into_response(),
        None if shared.empty_reads.load(Ordering::SeqCst) => StatusCode::OK.into_response(),
        None => Json(Value::Null).into_response(),
    }
}

async fn write_record(
    State(shared): State<Shared>,
    Path(file): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(record): Json<Value>,
) -> Response {
    if let Some(response) = check(&query, &shared.fail_writes) {
        return response;
    }

    let Some(key) = key_of(&file) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    shared
        .records
        .lock()
        .unwrap()
        .insert(key.to_string(), record.clone());

    if shared.text_writes.load(Ordering::SeqCst) {
        return (StatusCode::OK, "stored").into_response();
    }

    Json(record).into_response()
}

/// Send a request through the router and return status, headers and raw body.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> Result<(StatusCode, axum::http::HeaderMap, Vec<u8>)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder.body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))?;

    let response = app.oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;

    Ok((status, headers, bytes.to_vec()))
}

/// The `message` field of a JSON envelope.
pub fn message(body: &[u8]) -> String {
    let value: Value = serde_json::from_slice(body).unwrap();
    value["message"].as_str().unwrap().to_string()
}
