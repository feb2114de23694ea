//! Persistence for users and their favourites.
//!
//! # Stores
//!
//! - [`PgUserStore`] - `PostgreSQL` via sqlx (production)
//! - [`MemoryUserStore`] - process-local, for tests and local runs
//!
//! Both implement [`UserStore`], which is the only storage interface the
//! services depend on. Each call is a single round trip; concurrency control
//! is the store's responsibility.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p favourites-cli -- migrate
//! ```

pub mod memory;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use favourites_core::{FavouriteId, Favourites, UserId, UserName};

use crate::config::StoreBackend;
use crate::models::{NewUser, User, UserRecord};

pub use memory::MemoryUserStore;
pub use users::PgUserStore;

/// Embedded schema migrations for the `users` table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique user name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Storage for user records.
///
/// Favourite operations return `Ok(None)` when `user_id` does not resolve to a
/// user. `add_favourite` and `remove_favourite` must be atomic per user and
/// idempotent: adding a present id or removing an absent one leaves the set
/// unchanged.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user and their password digest by user name.
    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> Result<Option<UserRecord>, RepositoryError>;

    /// Create a user. Returns `RepositoryError::Conflict` if the name is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Current favourites of a user.
    async fn favourites(&self, user_id: UserId) -> Result<Option<Favourites>, RepositoryError>;

    /// Append `item` to a user's favourites unless already present.
    async fn add_favourite(
        &self,
        user_id: UserId,
        item: &FavouriteId,
    ) -> Result<Option<Favourites>, RepositoryError>;

    /// Remove `item` from a user's favourites if present.
    async fn remove_favourite(
        &self,
        user_id: UserId,
        item: &FavouriteId,
    ) -> Result<Option<Favourites>, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Open the configured store.
///
/// For `PostgreSQL` this establishes the pool, so a failure here means the
/// service must not start.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database connection cannot be established.
pub async fn connect(backend: &StoreBackend) -> Result<Arc<dyn UserStore>, sqlx::Error> {
    match backend {
        StoreBackend::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            Ok(Arc::new(PgUserStore::new(pool)))
        }
        StoreBackend::Memory => Ok(Arc::new(MemoryUserStore::new())),
    }
}
