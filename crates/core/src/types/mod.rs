//! Core types for the favourites service.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod favourite;
pub mod id;
pub mod user_name;

pub use favourite::{FavouriteId, FavouriteIdError, Favourites};
pub use id::*;
pub use user_name::{UserName, UserNameError};
