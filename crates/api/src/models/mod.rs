//! Domain models for the favourites API.

pub mod user;

pub use user::{DEFAULT_ROLE, NewUser, User, UserRecord};
