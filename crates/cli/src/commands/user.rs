//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! FAVOURITES_USER_PASSWORD=... fav-cli user create -u alice -f "Alice Liddell" -r admin
//! ```
//!
//! # Environment Variables
//!
//! - `FAVOURITES_USER_PASSWORD` - Password for the new user
//! - `JWT_SECRET`, `FAVOURITES_DATABASE_URL` - As for the server

use favourites_api::config::{ApiConfig, StoreBackend};
use favourites_api::db::{self, PgUserStore};
use favourites_api::models::DEFAULT_ROLE;
use favourites_api::services::{AuthService, TokenService, auth::Registration};
use secrecy::{ExposeSecret, SecretString};

use super::CommandError;

const PASSWORD_VAR: &str = "FAVOURITES_USER_PASSWORD";

/// Register a user through the same path as `POST /api/user/register`, with
/// the addition of a role (the HTTP endpoint always assigns the default).
///
/// # Returns
///
/// The ID of the created user.
pub async fn create(
    user_name: String,
    full_name: Option<String>,
    role: Option<String>,
) -> Result<i32, CommandError> {
    let password = std::env::var(PASSWORD_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
        .ok_or(CommandError::MissingEnvVar(PASSWORD_VAR))?;

    let config = ApiConfig::from_env()?;
    let StoreBackend::Postgres { database_url } = &config.store else {
        return Err(CommandError::NotPostgres(config.store.name()));
    };

    tracing::info!("Connecting to database...");
    let users = PgUserStore::new(db::create_pool(database_url).await?);
    let tokens = TokenService::new(config.jwt_secret.clone())
        .map_err(|e| CommandError::Auth(e.into()))?;

    let password = password.expose_secret().to_owned();
    let user = AuthService::new(&users, &tokens)
        .register_with_role(
            Registration {
                user_name: Some(user_name),
                password: Some(password.clone()),
                password2: Some(password),
                full_name,
            },
            role.as_deref().unwrap_or(DEFAULT_ROLE),
        )
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, User name: {}, Role: {}",
        user.id,
        user.user_name,
        user.role
    );

    Ok(user.id.as_i32())
}
