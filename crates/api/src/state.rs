//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::UserStore;
use crate::services::{TokenError, TokenService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything in it is immutable after startup
/// except what the store itself manages.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    users: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration (the signing secret is taken from here)
    /// * `users` - Connected user store
    ///
    /// # Errors
    ///
    /// Returns `TokenError::MissingSecret` if the configured secret is empty.
    pub fn new(config: ApiConfig, users: Arc<dyn UserStore>) -> Result<Self, TokenError> {
        let tokens = TokenService::new(config.jwt_secret.clone())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                users,
                tokens,
            }),
        })
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }
}
