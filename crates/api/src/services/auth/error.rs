//! Authentication error types.

use thiserror::Error;

use favourites_core::UserName;

use super::token::TokenError;
use crate::db::RepositoryError;

/// Errors that can occur during registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// The requested user name is already registered.
    #[error("User name {0} is already taken")]
    DuplicateUser(UserName),

    /// Unknown user name or wrong password.
    #[error("Invalid user name or password")]
    InvalidCredentials,

    /// Token could not be issued.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
