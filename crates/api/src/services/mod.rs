//! Business logic services.
//!
//! - `auth` - Registration, password login, token issuance
//! - `favourites` - Idempotent add/remove/list over a user's favourites

pub mod auth;
pub mod favourites;

pub use auth::{AuthError, AuthService, Claims, TokenError, TokenService};
pub use favourites::{FavouritesError, FavouritesService};
