//! Integration tests for registration, login, and favourites.
//!
//! The in-process tests need nothing running. Tests marked `#[ignore]` need a
//! running server (`cargo run -p favourites-api`) reachable at
//! `FAVOURITES_BASE_URL`.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use favourites_api::db::{MemoryUserStore, UserStore};
use favourites_api::models::DEFAULT_ROLE;
use favourites_core::UserName;
use favourites_integration_tests::{TEST_SECRET, TestApp, auth_header, live_base_url};

// ============================================================================
// End-to-End Flow
// ============================================================================

#[tokio::test]
async fn test_register_login_add_list_remove() {
    let app = TestApp::new();

    let registered = app.register("alice", "pw1").await;
    assert_eq!(registered.status, StatusCode::OK);
    assert_eq!(
        registered.message(),
        Some("User alice successfully registered")
    );
    assert!(registered.body.get("token").is_none());

    let login = app.login("alice", "pw1").await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.message(), Some("login successful"));
    let token = login.body["token"].as_str().unwrap().to_owned();
    assert!(!token.is_empty());

    let added = app
        .authorized(Method::PUT, "/api/user/favourites/42", &token)
        .await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(added.body, json!({ "favourites": ["42"] }));

    let listed = app
        .authorized(Method::GET, "/api/user/favourites", &token)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!(["42"]));

    let removed = app
        .authorized(Method::DELETE, "/api/user/favourites/42", &token)
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.body, json!([]));

    let listed = app
        .authorized(Method::GET, "/api/user/favourites", &token)
        .await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn test_favourites_are_idempotent_and_ordered() {
    let app = TestApp::new();
    let token = app.signed_in("alice", "pw1").await;

    for id in ["b", "a", "b"] {
        let response = app
            .authorized(Method::PUT, &format!("/api/user/favourites/{id}"), &token)
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let listed = app
        .authorized(Method::GET, "/api/user/favourites", &token)
        .await;
    assert_eq!(listed.body, json!(["b", "a"]));

    let once = app
        .authorized(Method::DELETE, "/api/user/favourites/b", &token)
        .await;
    let twice = app
        .authorized(Method::DELETE, "/api/user/favourites/b", &token)
        .await;
    assert_eq!(once.body, json!(["a"]));
    assert_eq!(twice.body, once.body);

    let never_added = app
        .authorized(Method::DELETE, "/api/user/favourites/zzz", &token)
        .await;
    assert_eq!(never_added.status, StatusCode::OK);
    assert_eq!(never_added.body, json!(["a"]));
}

#[tokio::test]
async fn test_favourites_are_per_user() {
    let app = TestApp::new();
    let alice = app.signed_in("alice", "pw1").await;
    let bob = app.signed_in("bob", "pw2").await;

    app.authorized(Method::PUT, "/api/user/favourites/1", &alice)
        .await;
    app.authorized(Method::PUT, "/api/user/favourites/2", &bob)
        .await;

    let alice_list = app
        .authorized(Method::GET, "/api/user/favourites", &alice)
        .await;
    let bob_list = app
        .authorized(Method::GET, "/api/user/favourites", &bob)
        .await;
    assert_eq!(alice_list.body, json!(["1"]));
    assert_eq!(bob_list.body, json!(["2"]));
}

#[tokio::test]
async fn test_concurrent_adds_store_one_entry() {
    let app = TestApp::new();
    let token = app.signed_in("alice", "pw1").await;

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let app = app.clone();
            let token = token.clone();
            tokio::spawn(async move {
                app.authorized(Method::PUT, "/api/user/favourites/42", &token)
                    .await
                    .status
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    let listed = app
        .authorized(Method::GET, "/api/user/favourites", &token)
        .await;
    assert_eq!(listed.body, json!(["42"]));
}

// ============================================================================
// Identity Guard
// ============================================================================

#[tokio::test]
async fn test_missing_header_is_401() {
    let app = TestApp::new();

    for (method, path) in [
        (Method::GET, "/api/user/favourites"),
        (Method::PUT, "/api/user/favourites/42"),
        (Method::DELETE, "/api/user/favourites/42"),
    ] {
        let response = app.request(method, path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response.body, Value::String("Unauthorized".to_string()));
    }
}

#[tokio::test]
async fn test_malformed_header_is_401() {
    let app = TestApp::new();
    let token = app.signed_in("alice", "pw1").await;

    for value in [
        format!("Bearer {token}"),
        format!("jwt {token} extra"),
        token.clone(),
        "jwt".to_string(),
        "jwt not-a-token".to_string(),
    ] {
        let response = app
            .request(Method::GET, "/api/user/favourites", Some(&value), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{value}");
    }

    // Scheme is matched case-insensitively
    let response = app
        .request(
            Method::GET,
            "/api/user/favourites",
            Some(&format!("JWT {token}")),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_from_another_secret_is_401() {
    let store = Arc::new(MemoryUserStore::new());
    let issuer = TestApp::with_store("first-secret", store.clone());
    let verifier = TestApp::with_store("second-secret", store);

    let token = issuer.signed_in("alice", "pw1").await;

    let response = verifier
        .authorized(Method::GET, "/api/user/favourites", &token)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_for_unknown_user_is_422() {
    let issuer = TestApp::new();
    let token = issuer.signed_in("alice", "pw1").await;

    // Same secret, but this store has never seen alice
    let other = TestApp::with_store(TEST_SECRET, Arc::new(MemoryUserStore::new()));
    let response = other
        .authorized(Method::GET, "/api/user/favourites", &token)
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.message(), Some("Unable to find user with id: 1"));
}

// ============================================================================
// Registration and Login Failures
// ============================================================================

#[tokio::test]
async fn test_duplicate_registration_is_422() {
    let app = TestApp::new();
    assert_eq!(app.register("alice", "pw1").await.status, StatusCode::OK);

    let again = app.register("alice", "other").await;
    assert_eq!(again.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(again.message(), Some("User name alice is already taken"));

    // The original password still works
    assert_eq!(app.login("alice", "pw1").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_registration_validation_is_422() {
    let app = TestApp::new();

    let mismatch = app
        .request(
            Method::POST,
            "/api/user/register",
            None,
            Some(json!({ "userName": "alice", "password": "pw1", "password2": "pw2" })),
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(mismatch.message(), Some("Passwords do not match"));

    let missing = app
        .request(
            Method::POST,
            "/api/user/register",
            None,
            Some(json!({ "password": "pw1", "password2": "pw1" })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(missing.message(), Some("Missing required field: userName"));
}

#[tokio::test]
async fn test_names_and_ids_are_taken_verbatim() {
    let app = TestApp::new();
    let long_name = "n".repeat(65);

    for name in [" alice ", long_name.as_str()] {
        let registered = app.register(name, "pw1").await;
        assert_eq!(registered.status, StatusCode::OK, "{name:?}");
        assert_eq!(
            registered.message(),
            Some(format!("User {name} successfully registered").as_str())
        );
    }

    // The padded name is its own account
    assert_eq!(app.login("alice", "pw1").await.status, StatusCode::UNPROCESSABLE_ENTITY);

    let token = app.login(&long_name, "pw1").await.body["token"]
        .as_str()
        .unwrap()
        .to_owned();

    let long_id = "7".repeat(129);
    let added = app
        .authorized(Method::PUT, &format!("/api/user/favourites/{long_id}"), &token)
        .await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(added.body, json!({ "favourites": [long_id] }));
}

#[tokio::test]
async fn test_registration_ignores_client_role() {
    let store = Arc::new(MemoryUserStore::new());
    let app = TestApp::with_store(TEST_SECRET, store.clone());

    let registered = app
        .request(
            Method::POST,
            "/api/user/register",
            None,
            Some(json!({
                "userName": "mallory",
                "password": "pw1",
                "password2": "pw1",
                "fullName": "Mallory",
                "role": "admin",
            })),
        )
        .await;
    assert_eq!(registered.status, StatusCode::OK);

    let record = store
        .find_by_user_name(&UserName::parse("mallory").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.user.role, DEFAULT_ROLE);
    assert_eq!(record.user.full_name.as_deref(), Some("Mallory"));
}

#[tokio::test]
async fn test_bad_credentials_are_422() {
    let app = TestApp::new();
    app.register("alice", "pw1").await;

    for (user, password) in [("alice", "wrong"), ("nobody", "pw1")] {
        let response = app.login(user, password).await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.message(), Some("Invalid user name or password"));
        assert!(response.body.get("token").is_none());
    }
}

#[tokio::test]
async fn test_unparsable_body_is_422() {
    let app = TestApp::new();
    let request = axum::http::Request::post("/api/user/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.message().is_some_and(|m| !m.is_empty()));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let live = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body, Value::String("ok".to_string()));

    let ready = app.request(Method::GET, "/health/ready", None, None).await;
    assert_eq!(ready.status, StatusCode::OK);
}

// ============================================================================
// Live Server
// ============================================================================

#[tokio::test]
#[ignore = "requires a running favourites-api server"]
async fn test_live_server_round_trip() {
    let base_url = live_base_url();
    let client = reqwest::Client::new();
    let user_name = format!("it-{}", chrono::Utc::now().timestamp_micros());

    let registered = client
        .post(format!("{base_url}/api/user/register"))
        .json(&json!({ "userName": user_name, "password": "pw1", "password2": "pw1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(registered.status(), reqwest::StatusCode::OK);

    let login: Value = client
        .post(format!("{base_url}/api/user/login"))
        .json(&json!({ "userName": user_name, "password": "pw1" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = login["token"].as_str().unwrap();

    let added = client
        .put(format!("{base_url}/api/user/favourites/42"))
        .header("authorization", auth_header(token))
        .send()
        .await
        .unwrap();
    assert_eq!(added.status(), reqwest::StatusCode::OK);

    let listed: Value = client
        .get(format!("{base_url}/api/user/favourites"))
        .header("authorization", auth_header(token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!(["42"]));

    let unauthorized = client
        .get(format!("{base_url}/api/user/favourites"))
        .send()
        .await
        .unwrap();
    assert_eq!(unauthorized.status(), reqwest::StatusCode::UNAUTHORIZED);
}
