//! Subcommand implementations.

pub mod migrate;
pub mod user;

use secrecy::SecretString;
use thiserror::Error;

use favourites_api::config::ConfigError;
use favourites_api::services::AuthError;

/// Errors that can occur while running a CLI command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Server configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The command needs `PostgreSQL` but the configured store is not.
    #[error("Command requires the postgres store, but FAVOURITES_STORE={0}")]
    NotPostgres(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Registration was refused.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Connection string from `FAVOURITES_DATABASE_URL`, falling back to `DATABASE_URL`.
pub fn database_url() -> Result<SecretString, CommandError> {
    ["FAVOURITES_DATABASE_URL", "DATABASE_URL"]
        .into_iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .map(SecretString::from)
        .ok_or(CommandError::MissingEnvVar("FAVOURITES_DATABASE_URL"))
}
