//! Authentication service.
//!
//! Provides password registration and login. Login issues a signed token via
//! [`TokenService`]; registration never does.

mod error;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TokenError, TokenService};

use serde::Deserialize;

use favourites_core::UserName;

use crate::db::{RepositoryError, UserStore};
use crate::models::{DEFAULT_ROLE, NewUser, User};

/// Registration input. Every field is optional at the type level so that
/// absent fields surface as validation errors rather than parse failures.
///
/// There is no `role` field: self-registered users always get
/// [`DEFAULT_ROLE`]; other roles are assigned through
/// [`AuthService::register_with_role`].
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub password2: Option<String>,
    pub full_name: Option<String>,
}

/// Login input.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: Option<String>,
    pub password: Option<String>,
}

/// Authentication service.
///
/// Handles user registration and password login.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore, tokens: &'a TokenService) -> Self {
        Self { users, tokens }
    }

    /// Register a new user with [`DEFAULT_ROLE`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if a required field is absent or the
    /// two passwords differ.
    /// Returns `AuthError::DuplicateUser` if the user name is already registered.
    pub async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        self.register_with_role(registration, DEFAULT_ROLE).await
    }

    /// Register a new user with an explicit role. Not reachable over HTTP.
    ///
    /// An empty `role` falls back to [`DEFAULT_ROLE`].
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub async fn register_with_role(
        &self,
        registration: Registration,
        role: &str,
    ) -> Result<User, AuthError> {
        let user_name = required(registration.user_name.as_deref(), "userName")?;
        let password = required(registration.password.as_deref(), "password")?;
        let confirmation = required(registration.password2.as_deref(), "password2")?;

        let user_name = UserName::parse(user_name)
            .map_err(|e| AuthError::Validation(format!("Invalid user name: {e}")))?;

        if password != confirmation {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        let password_hash = password::hash_password(password)?;

        let new_user = NewUser {
            user_name: user_name.clone(),
            password_hash,
            full_name: registration.full_name.filter(|s| !s.is_empty()),
            role: if role.is_empty() {
                DEFAULT_ROLE.to_string()
            } else {
                role.to_string()
            },
        };

        let user = self.users.create(new_user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::DuplicateUser(user_name),
            other => AuthError::Repository(other),
        })?;

        tracing::info!(user_id = %user.id, user_name = %user.user_name, "User registered");
        Ok(user)
    }

    /// Check a user name and password, returning the claims to sign.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if a field is absent.
    /// Returns `AuthError::InvalidCredentials` if the user is unknown or the
    /// password is wrong.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Claims, AuthError> {
        let user_name = required(credentials.user_name.as_deref(), "userName")?;
        let password = required(credentials.password.as_deref(), "password")?;

        // A name that cannot exist is reported like any unknown user
        let Ok(user_name) = UserName::parse(user_name) else {
            return Err(AuthError::InvalidCredentials);
        };

        let record = self
            .users
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(password, &record.password_hash) {
            tracing::debug!(user_name = %user_name, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Claims::from(&record.user))
    }

    /// Log in and issue a token.
    ///
    /// # Errors
    ///
    /// See [`authenticate`](Self::authenticate); additionally returns
    /// `AuthError::Token` if signing fails.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let claims = self.authenticate(credentials).await?;
        let token = self.tokens.sign(&claims)?;

        tracing::info!(user_id = %claims.id, user_name = %claims.user_name, "User logged in");
        Ok(token)
    }
}

/// Presence check for a required text field.
fn required<'v>(value: Option<&'v str>, field: &str) -> Result<&'v str, AuthError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AuthError::Validation(format!("Missing required field: {field}"))),
    }
}
