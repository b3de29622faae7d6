//! Store client behaviour against the fake document store.

mod common;

use anyhow::Result;
use authgate::store::{StoreError, User};
use axum::http::StatusCode;
use common::{FakeStore, SECRET};
use serde_json::json;

#[tokio::test]
async fn get_missing_record_is_none() -> Result<()> {
    let store = FakeStore::start().await?;

    assert_eq!(store.client(SECRET).get("nobody@example_com").await?, None);
    Ok(())
}

#[tokio::test]
async fn get_empty_body_is_none() -> Result<()> {
    let store = FakeStore::start().await?;
    store.empty_reads(true);

    assert_eq!(store.client(SECRET).get("nobody@example_com").await?, None);
    Ok(())
}

#[tokio::test]
async fn put_then_get_round_trips_the_record() -> Result<()> {
    let store = FakeStore::start().await?;
    let client = store.client(SECRET);

    let user = User {
        email: "a.b@example.com".to_string(),
        password: "secret1".to_string(),
    };
    client.put("a_b@example_com", &user).await?;

    assert_eq!(client.get("a_b@example_com").await?, Some(user));
    assert_eq!(
        store.record("a_b@example_com"),
        Some(json!({ "email": "a.b@example.com", "password": "secret1" }))
    );
    Ok(())
}

#[tokio::test]
async fn put_replaces_existing_record() -> Result<()> {
    let store = FakeStore::start().await?;
    let client = store.client(SECRET);

    for password in ["first1", "second2"] {
        let user = User {
            email: "a@b.co".to_string(),
            password: password.to_string(),
        };
        client.put("a@b_co", &user).await?;
    }

    let user = client.get("a@b_co").await?;
    assert_eq!(user.map(|u| u.password), Some("second2".to_string()));
    assert_eq!(store.len(), 1);
    Ok(())
}

#[tokio::test]
async fn wrong_secret_is_a_status_error() -> Result<()> {
    let store = FakeStore::start().await?;

    let err = store
        .client("wrong")
        .get("a@b_co")
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("expected an error"))?;

    match err {
        StoreError::Status { status, body } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("Permission denied"));
        }
        other => anyhow::bail!("unexpected error: {other}"),
    }
    Ok(())
}

#[tokio::test]
async fn failed_write_is_a_status_error() -> Result<()> {
    let store = FakeStore::start().await?;
    store.fail_writes(true);

    let user = User {
        email: "a@b.co".to_string(),
        password: "secret1".to_string(),
    };
    let result = store.client(SECRET).put("a@b_co", &user).await;

    assert!(matches!(
        result,
        Err(StoreError::Status { status, .. }) if status == StatusCode::SERVICE_UNAVAILABLE
    ));
    assert_eq!(store.len(), 0);
    Ok(())
}

#[tokio::test]
async fn unexpected_record_shape_is_a_decode_error() -> Result<()> {
    let store = FakeStore::start().await?;
    store.insert("a@b_co", json!("not a user"));

    let result = store.client(SECRET).get("a@b_co").await;

    assert!(matches!(result, Err(StoreError::Decode(_))));
    Ok(())
}

#[tokio::test]
async fn put_with_non_json_echo_is_a_decode_error() -> Result<()> {
    let store = FakeStore::start().await?;
    store.text_writes(true);

    let user = User {
        email: "a@b.co".to_string(),
        password: "secret1".to_string(),
    };
    let result = store.client(SECRET).put("a@b_co", &user).await;

    assert!(matches!(result, Err(StoreError::Decode(_))));
    Ok(())
}
