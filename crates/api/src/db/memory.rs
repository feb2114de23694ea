//! Thread-safe in-memory [`UserStore`] for local runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use favourites_core::{FavouriteId, Favourites, UserId, UserName};

use super::{RepositoryError, UserStore};
use crate::models::{NewUser, User, UserRecord};

#[derive(Debug, Default)]
struct Tables {
    last_id: i32,
    users: HashMap<UserId, UserRecord>,
    by_name: HashMap<UserName, UserId>,
}

/// Storage backend that keeps user records in-process.
#[derive(Debug, Default)]
pub struct MemoryUserStore(RwLock<Tables>);

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().users.len()
    }

    /// Whether no user has registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn mutate_favourites(
        &self,
        user_id: UserId,
        apply: impl FnOnce(&mut Favourites),
    ) -> Option<Favourites> {
        let mut tables = self.0.write();
        let record = tables.users.get_mut(&user_id)?;
        apply(&mut record.user.favourites);
        Some(record.user.favourites.clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let tables = self.0.read();
        Ok(tables
            .by_name
            .get(user_name)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.0.write();
        if tables.by_name.contains_key(&user.user_name) {
            return Err(RepositoryError::Conflict(
                "user name already exists".to_owned(),
            ));
        }

        tables.last_id += 1;
        let id = UserId::new(tables.last_id);
        let created = User {
            id,
            user_name: user.user_name.clone(),
            full_name: user.full_name,
            role: user.role,
            favourites: Favourites::default(),
            created_at: Utc::now(),
        };

        tables.by_name.insert(user.user_name, id);
        tables.users.insert(
            id,
            UserRecord {
                user: created.clone(),
                password_hash: user.password_hash,
            },
        );

        Ok(created)
    }

    async fn favourites(&self, user_id: UserId) -> Result<Option<Favourites>, RepositoryError> {
        Ok(self
            .0
            .read()
            .users
            .get(&user_id)
            .map(|record| record.user.favourites.clone()))
    }

    async fn add_favourite(
        &self,
        user_id: UserId,
        item: &FavouriteId,
    ) -> Result<Option<Favourites>, RepositoryError> {
        Ok(self.mutate_favourites(user_id, |favourites| {
            favourites.insert(item.clone());
        }))
    }

    async fn remove_favourite(
        &self,
        user_id: UserId,
        item: &FavouriteId,
    ) -> Result<Option<Favourites>, RepositoryError> {
        Ok(self.mutate_favourites(user_id, |favourites| {
            favourites.remove(item);
        }))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
