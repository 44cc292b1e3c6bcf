//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use finance_tracker::auth::{PasswordHashingParams, PasswordService, TokenService};
use finance_tracker::store::{MemoryStore, SharedStore};
use finance_tracker::{api, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Argon2 parameters cheap enough for debug-build tests
pub fn cheap_password_service() -> PasswordService {
    PasswordService::new(&PasswordHashingParams {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("valid test hashing params")
}

pub fn test_state(store: SharedStore) -> AppState {
    AppState::new(store, cheap_password_service(), TokenService::new(TEST_SECRET))
}

/// Application router over a fresh in-memory store
pub fn memory_app() -> Router {
    let store: SharedStore = Arc::new(MemoryStore::with_categories(["Income", "Rent"]));
    api::build_router(test_state(store))
}

/// Send a request and decode the JSON response body
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };

    (status, value)
}

/// Register a user and return a login token for them
pub async fn signup_and_login(app: &Router, email: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/api/signup",
        None,
        Some(serde_json::json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": email,
            "password": "Abcd1234!"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed for {email}");

    let (status, body) = send(
        app,
        "POST",
        "/api/login",
        None,
        Some(serde_json::json!({ "email": email, "password": "Abcd1234!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed for {email}");

    body["token"].as_str().unwrap().to_string()
}
