//! Token authentication guard.
//!
//! Protected handlers take a [`RequireAuth`] argument. Extraction reads the
//! `Authorization: jwt <token>` header, verifies the token, and either hands
//! the handler an [`AuthenticatedUser`] or rejects with 401 before the handler
//! body runs.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};

use favourites_core::{UserId, UserName};

use crate::error::set_sentry_user;
use crate::services::TokenService;
use crate::state::AppState;

/// Scheme name expected in the `Authorization` header (matched case-insensitively).
pub const AUTH_SCHEME: &str = "jwt";

/// Identity bound to a request after its token verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub user_name: UserName,
}

/// Extractor that requires a valid token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.user_name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header.
    MissingHeader,
    /// Header is not `<scheme> <token>` with the expected scheme.
    MalformedHeader,
    /// Token did not verify.
    InvalidToken,
}

impl AuthRejection {
    const fn reason(self) -> &'static str {
        match self {
            Self::MissingHeader => "missing authorization header",
            Self::MalformedHeader => "malformed authorization header",
            Self::InvalidToken => "invalid token",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Returns `None` unless the value is exactly `<scheme> <token>` with the
/// `jwt` scheme.
#[must_use]
pub fn token_from_header(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    if parts.next().is_some() || !scheme.eq_ignore_ascii_case(AUTH_SCHEME) {
        return None;
    }

    Some(token)
}

/// Verify the request's `Authorization` header.
///
/// # Errors
///
/// Returns the reason the request must be rejected.
pub fn authenticate(
    headers: &HeaderMap,
    tokens: &TokenService,
) -> Result<AuthenticatedUser, AuthRejection> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthRejection::MissingHeader)?
        .to_str()
        .map_err(|_| AuthRejection::MalformedHeader)?;

    let token = token_from_header(value).ok_or(AuthRejection::MalformedHeader)?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        AuthRejection::InvalidToken
    })?;

    Ok(AuthenticatedUser {
        id: claims.id,
        user_name: claims.user_name,
    })
}

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        match authenticate(&parts.headers, state.tokens()) {
            Ok(user) => {
                set_sentry_user(&user.id, user.user_name.as_str());
                Ok(Self(user))
            }
            Err(rejection) => {
                tracing::debug!(
                    path = %parts.uri.path(),
                    reason = rejection.reason(),
                    "Rejected unauthenticated request"
                );
                Err(rejection)
            }
        }
    }
}
