//! Per-user favourites.
//!
//! Thin layer over [`UserStore`]: every call is one store round trip, with no
//! caching. Add and remove are idempotent; only an unknown user is an error.

use thiserror::Error;

use favourites_core::{FavouriteId, Favourites, UserId};

use crate::db::{RepositoryError, UserStore};

/// Errors from favourites operations.
#[derive(Debug, Error)]
pub enum FavouritesError {
    /// The user id does not resolve to a user.
    #[error("Unable to find user with id: {0}")]
    UserNotFound(UserId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Favourites service.
pub struct FavouritesService<'a> {
    users: &'a dyn UserStore,
}

impl<'a> FavouritesService<'a> {
    /// Create a new favourites service.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    /// A user's favourites in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `FavouritesError::UserNotFound` if the user does not exist.
    pub async fn list(&self, user_id: UserId) -> Result<Favourites, FavouritesError> {
        self.users
            .favourites(user_id)
            .await?
            .ok_or(FavouritesError::UserNotFound(user_id))
    }

    /// Add an item, returning the updated favourites.
    ///
    /// # Errors
    ///
    /// Returns `FavouritesError::UserNotFound` if the user does not exist.
    pub async fn add(
        &self,
        user_id: UserId,
        item: &FavouriteId,
    ) -> Result<Favourites, FavouritesError> {
        let favourites = self
            .users
            .add_favourite(user_id, item)
            .await?
            .ok_or(FavouritesError::UserNotFound(user_id))?;

        tracing::debug!(%user_id, item_id = %item, count = favourites.len(), "Favourite added");
        Ok(favourites)
    }

    /// Remove an item, returning the updated favourites.
    ///
    /// # Errors
    ///
    /// Returns `FavouritesError::UserNotFound` if the user does not exist.
    pub async fn remove(
        &self,
        user_id: UserId,
        item: &FavouriteId,
    ) -> Result<Favourites, FavouritesError> {
        let favourites = self
            .users
            .remove_favourite(user_id, item)
            .await?
            .ok_or(FavouritesError::UserNotFound(user_id))?;

        tracing::debug!(%user_id, item_id = %item, count = favourites.len(), "Favourite removed");
        Ok(favourites)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use favourites_core::UserName;

    use super::*;
    use crate::db::MemoryUserStore;
    use crate::models::NewUser;

    async fn store_with_user() -> (MemoryUserStore, UserId) {
        let store = MemoryUserStore::new();
        let user = store
            .create(NewUser {
                user_name: UserName::parse("alice").unwrap(),
                password_hash: "digest".to_string(),
                full_name: None,
                role: "user".to_string(),
            })
            .await
            .unwrap();
        (store, user.id)
    }

    fn id(s: &str) -> FavouriteId {
        FavouriteId::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let (store, user_id) = store_with_user().await;
        let favourites = FavouritesService::new(&store);

        let once = favourites.add(user_id, &id("42")).await.unwrap();
        let twice = favourites.add(user_id, &id("42")).await.unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.as_slice(), &[id("42")]);
    }

    #[tokio::test]
    async fn test_add_appends() {
        let (store, user_id) = store_with_user().await;
        let favourites = FavouritesService::new(&store);

        favourites.add(user_id, &id("b")).await.unwrap();
        favourites.add(user_id, &id("a")).await.unwrap();
        let all = favourites.list(user_id).await.unwrap();
        assert_eq!(all.as_slice(), &[id("b"), id("a")]);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (store, user_id) = store_with_user().await;
        let favourites = FavouritesService::new(&store);
        favourites.add(user_id, &id("1")).await.unwrap();
        favourites.add(user_id, &id("2")).await.unwrap();

        let once = favourites.remove(user_id, &id("1")).await.unwrap();
        let twice = favourites.remove(user_id, &id("1")).await.unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.as_slice(), &[id("2")]);

        let never_added = favourites.remove(user_id, &id("99")).await.unwrap();
        assert_eq!(never_added, twice);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let store = MemoryUserStore::new();
        let favourites = FavouritesService::new(&store);
        let ghost = UserId::new(7);

        assert!(matches!(
            favourites.list(ghost).await,
            Err(FavouritesError::UserNotFound(id)) if id == ghost
        ));
        assert!(matches!(
            favourites.add(ghost, &id("1")).await,
            Err(FavouritesError::UserNotFound(_))
        ));
        assert!(matches!(
            favourites.remove(ghost, &id("1")).await,
            Err(FavouritesError::UserNotFound(_))
        ));
    }
}
