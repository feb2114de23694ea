//! Favourite item identifiers and the per-user favourites set.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`FavouriteId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FavouriteIdError {
    /// The input string is empty.
    #[error("favourite id cannot be empty")]
    Empty,
}

/// Identifier of a favourited item.
///
/// The service treats it as an opaque string: it is whatever the client put
/// in the `/favourites/{id}` path segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct FavouriteId(String);

impl FavouriteId {
    /// Parse a `FavouriteId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty.
    pub fn parse(s: &str) -> Result<Self, FavouriteIdError> {
        if s.is_empty() {
            return Err(FavouriteIdError::Empty);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FavouriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FavouriteId {
    type Error = FavouriteIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FavouriteId> for String {
    fn from(id: FavouriteId) -> Self {
        id.0
    }
}

/// A user's favourites: an ordered set of item ids.
///
/// Insertion order is preserved and an id appears at most once. Both
/// [`insert`](Self::insert) and [`remove`](Self::remove) are idempotent.
///
/// ```
/// use favourites_core::{FavouriteId, Favourites};
///
/// let id = FavouriteId::parse("42").unwrap();
/// let mut favourites = Favourites::default();
///
/// favourites.insert(id.clone());
/// favourites.insert(id.clone());
/// assert_eq!(favourites.len(), 1);
///
/// favourites.remove(&id);
/// favourites.remove(&id);
/// assert!(favourites.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Favourites(Vec<FavouriteId>);

impl Favourites {
    /// Build a set from stored ids, dropping any repeated id after its first
    /// occurrence.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = FavouriteId>) -> Self {
        let mut favourites = Self::default();
        for id in ids {
            favourites.insert(id);
        }
        favourites
    }

    /// Append `id` unless it is already present.
    ///
    /// Returns `true` if the set changed.
    pub fn insert(&mut self, id: FavouriteId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Remove `id` if present.
    ///
    /// Returns `true` if the set changed.
    pub fn remove(&mut self, id: &FavouriteId) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != id);
        self.0.len() != before
    }

    /// Whether `id` is in the set.
    #[must_use]
    pub fn contains(&self, id: &FavouriteId) -> bool {
        self.0.iter().any(|existing| existing == id)
    }

    /// The ids in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[FavouriteId] {
        &self.0
    }

    /// Number of ids in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the set, returning the ids in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<FavouriteId> {
        self.0
    }
}

impl<'de> Deserialize<'de> for Favourites {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ids = Vec::<FavouriteId>::deserialize(deserializer)?;
        Ok(Self::from_ids(ids))
    }
}
