//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Every business or storage
//! failure becomes `422 {"message": ...}`; authentication failures never get
//! here because the guard rejects with 401 first.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, FavouritesError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Registration or login failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Favourites operation failed.
    #[error(transparent)]
    Favourites(#[from] FavouritesError),

    /// Request body or path could not be understood.
    #[error("{0}")]
    BadRequest(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl AppError {
    /// Whether this failure is a fault on our side rather than the caller's.
    fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash | AuthError::Token(_))
                | Self::Favourites(FavouritesError::Repository(_))
        )
    }

    fn repository_error(&self) -> Option<&RepositoryError> {
        match self {
            Self::Auth(AuthError::Repository(e)) | Self::Favourites(FavouritesError::Repository(e)) => {
                Some(e)
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_fault() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                storage = self.repository_error().is_some(),
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = ErrorBody {
            message: self.to_string(),
        };

        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the current request.
///
/// Called by the authentication guard so that errors are associated with the
/// user who made the request.
pub fn set_sentry_user(user_id: &impl ToString, user_name: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: Some(user_name.to_string()),
            ..Default::default()
        }));
    });
}
