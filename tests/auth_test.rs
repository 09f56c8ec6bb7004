//! Session middleware tests
//!
//! Exercises the cookie-based demo auth end to end: issuing the session on
//! login, presenting it to protected routes, and clearing it on logout.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::Utc;
use http_body_util::BodyExt;
use parking_lot::RwLock;
use serde_json::{json, Value};
use std::env;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use linkboard::database::{init_db, AppState};
use linkboard::fixtures;
use linkboard::middleware::session_set_cookie;
use linkboard::route::create_app;

// Mutex to ensure tests that modify env vars don't run in parallel
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn setup_test_app() -> (axum::Router, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_db.path().to_str().unwrap();
    let db = init_db(db_path).expect("Failed to initialize test database");
    let state = AppState {
        db: Arc::new(db),
        campaigns: Arc::new(fixtures::seed_campaigns(Utc::now())),
        links: Arc::new(RwLock::new(fixtures::seed_links("lb.sh"))),
    };
    (create_app(state), temp_db)
}

/// Helper function to parse response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

#[tokio::test]
async fn test_session_cookie_grants_access() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/campaigns")
                .header("cookie", "session=demo-session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_session_is_rejected() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/campaigns")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_empty_session_value_is_rejected() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/links")
                .header("cookie", "session=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_cookie_round_trips() {
    let (app, _temp_db) = setup_test_app();

    // Sign in and capture the issued cookie
    let payload = json!({ "email": "demo@linkboard.dev" });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    // "session=demo-session" before the first attribute separator
    let pair = set_cookie.split(';').next().unwrap();

    // Present the cookie back to a protected route
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header("cookie", pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["user"]["id"], "usr_demo");
}

#[tokio::test]
async fn test_secure_attribute_follows_app_env() {
    let _guard = ENV_MUTEX.lock().unwrap();

    env::set_var("APP_ENV", "production");
    assert!(session_set_cookie().contains("; Secure"));

    env::remove_var("APP_ENV");
    assert!(!session_set_cookie().contains("; Secure"));
}
