//! Registration and login handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::services::AuthService;
use crate::services::auth::{Credentials, Registration};
use crate::state::AppState;

// =============================================================================
// Response Types
// =============================================================================

/// Body returned after a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Body returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

/// Turn a body extraction failure into a 422 with the extractor's reason.
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a user. No token is issued; the client logs in separately.
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Registration>, JsonRejection>,
) -> Result<Json<RegisterResponse>> {
    let registration = json_body(payload)?;

    let user = AuthService::new(state.users(), state.tokens())
        .register(registration)
        .await?;

    Ok(Json(RegisterResponse {
        message: format!("User {} successfully registered", user.user_name),
    }))
}

/// Check credentials and issue a token.
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let credentials = json_body(payload)?;

    let token = AuthService::new(state.users(), state.tokens())
        .login(&credentials)
        .await?;

    Ok(Json(LoginResponse {
        message: "login successful",
        token,
    }))
}
