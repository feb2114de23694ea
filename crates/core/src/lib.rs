//! Favourites Core - Shared types library.
//!
//! This crate provides the domain types used across the favourites workspace:
//! - `api` - HTTP service (registration, login, favourites)
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Persistence adapters live in the `api` crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for user IDs, user names, and favourite item IDs,
//!   plus the ordered [`Favourites`] set

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
