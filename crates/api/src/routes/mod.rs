//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness check
//! GET    /health/ready                - Readiness check (store reachable)
//!
//! # Accounts
//! POST   /api/user/register           - Create a user
//! POST   /api/user/login              - Exchange credentials for a token
//!
//! # Favourites (requires `Authorization: jwt <token>`)
//! GET    /api/user/favourites         - List favourites
//! PUT    /api/user/favourites/{id}    - Add a favourite
//! DELETE /api/user/favourites/{id}    - Remove a favourite
//! ```

pub mod favourites;
pub mod user;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the `/api/user` routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(user::register))
        .route("/login", post(user::login))
        .route("/favourites", get(favourites::list))
        .route(
            "/favourites/{id}",
            put(favourites::add).delete(favourites::remove),
        )
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/user", user_routes())
}
