//! Integration tests for the favourites API.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (no database needed)
//! cargo test -p favourites-integration-tests
//!
//! # Live-server tests against a running instance
//! FAVOURITES_BASE_URL=http://localhost:8080 \
//!     cargo test -p favourites-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_favourites` - Registration, login, and favourites through the router
//!
//! [`TestApp`] drives the real router with `tower::ServiceExt::oneshot`, backed
//! by the in-memory store, so every request exercises the same extractors,
//! guards, and error mapping as the server.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use favourites_api::app;
use favourites_api::config::ApiConfig;
use favourites_api::db::{MemoryUserStore, UserStore};
use favourites_api::middleware::AUTH_SCHEME;
use favourites_api::state::AppState;

/// Signing secret used by [`TestApp::new`].
pub const TEST_SECRET: &str = "integration-test-secret-7c1e9a";

/// A response with its body decoded as JSON (or as a JSON string if the body
/// is not JSON).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `message` field of a JSON body, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// In-process application under test.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// App with a fresh in-memory store and [`TEST_SECRET`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(TEST_SECRET, Arc::new(MemoryUserStore::new()))
    }

    /// App over an existing store, signing with `secret`.
    #[must_use]
    pub fn with_store(secret: &str, users: Arc<dyn UserStore>) -> Self {
        let state = AppState::new(ApiConfig::in_memory(secret), users)
            .expect("test secret is non-empty");
        Self { router: app(state) }
    }

    /// Send a request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse { status, body }
    }

    /// Send `method path` with an optional raw `Authorization` value and JSON body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    /// Send a request carrying `token` in the expected scheme.
    pub async fn authorized(&self, method: Method, path: &str, token: &str) -> TestResponse {
        let value = auth_header(token);
        self.request(method, path, Some(&value), None).await
    }

    /// `POST /api/user/register` with matching passwords.
    pub async fn register(&self, user_name: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/user/register",
            None,
            Some(json!({
                "userName": user_name,
                "password": password,
                "password2": password,
            })),
        )
        .await
    }

    /// `POST /api/user/login`.
    pub async fn login(&self, user_name: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/api/user/login",
            None,
            Some(json!({ "userName": user_name, "password": password })),
        )
        .await
    }

    /// Register then log in, returning the issued token.
    pub async fn signed_in(&self, user_name: &str, password: &str) -> String {
        let registered = self.register(user_name, password).await;
        assert_eq!(registered.status, StatusCode::OK, "{:?}", registered.body);

        let login = self.login(user_name, password).await;
        assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);

        login.body["token"]
            .as_str()
            .expect("login response has a token")
            .to_owned()
    }
}

/// `Authorization` header value for `token`.
#[must_use]
pub fn auth_header(token: &str) -> String {
    format!("{AUTH_SCHEME} {token}")
}

/// Base URL of a running server for live tests.
#[must_use]
pub fn live_base_url() -> String {
    std::env::var("FAVOURITES_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}
