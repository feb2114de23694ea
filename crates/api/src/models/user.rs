//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};

use favourites_core::{Favourites, UserId, UserName};

/// Role assigned to users registered without one.
pub const DEFAULT_ROLE: &str = "user";

/// A registered user (domain type).
///
/// Never carries the password hash; see [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique, case-sensitive login name.
    pub user_name: UserName,
    /// Display name, if provided at registration.
    pub full_name: Option<String>,
    /// Free-form role label (defaults to `user`).
    pub role: String,
    /// Favourite item ids in insertion order.
    pub favourites: Favourites,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// A user together with the stored password digest, as needed at login.
#[derive(Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("user", &self.user)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Data required to create a user.
#[derive(Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("user_name", &self.user_name)
            .field("password_hash", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .finish()
    }
}
