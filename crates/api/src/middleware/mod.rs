//! HTTP middleware and extractors.
//!
//! Layers are applied in `crate::app` (trace, CORS) and `main` (Sentry). The
//! authentication guard is an extractor, so it runs only on the handlers that
//! ask for it.

pub mod auth;

pub use auth::{AUTH_SCHEME, AuthRejection, AuthenticatedUser, RequireAuth, authenticate};
