//! `PostgreSQL` user store.
//!
//! Favourites live in a `TEXT[]` column on the `users` row. Add and remove are
//! each a single `UPDATE ... RETURNING`, so they are atomic under concurrent
//! requests for the same user.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use favourites_core::{FavouriteId, Favourites, UserId, UserName};

use super::{RepositoryError, UserStore};
use crate::models::{NewUser, User, UserRecord};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    user_name: String,
    password_hash: String,
    full_name: Option<String>,
    role: String,
    favourites: Vec<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> Result<UserRecord, RepositoryError> {
        let user_name = UserName::parse(&self.user_name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user name in database: {e}"))
        })?;

        Ok(UserRecord {
            user: User {
                id: self.id,
                user_name,
                full_name: self.full_name,
                role: self.role,
                favourites: favourites_from_row(self.favourites)?,
                created_at: self.created_at,
            },
            password_hash: self.password_hash,
        })
    }
}

fn favourites_from_row(ids: Vec<String>) -> Result<Favourites, RepositoryError> {
    let ids = ids
        .iter()
        .map(|id| FavouriteId::parse(id))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid favourite id in database: {e}"))
        })?;
    Ok(Favourites::from_ids(ids))
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, user_name, password_hash, full_name, role, favourites, created_at
            FROM users
            WHERE user_name = $1
            ",
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_record).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (user_name, password_hash, full_name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_name, password_hash, full_name, role, favourites, created_at
            ",
        )
        .bind(user.user_name.as_str())
        .bind(&user.password_hash)
        .bind(user.full_name.as_deref())
        .bind(&user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("user name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into_record()?.user)
    }

    async fn favourites(&self, user_id: UserId) -> Result<Option<Favourites>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, Vec<String>>(
            r"
            SELECT favourites
            FROM users
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        ids.map(favourites_from_row).transpose()
    }

    async fn add_favourite(
        &self,
        user_id: UserId,
        item: &FavouriteId,
    ) -> Result<Option<Favourites>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, Vec<String>>(
            r"
            UPDATE users
            SET favourites = CASE
                WHEN $2::TEXT = ANY(favourites) THEN favourites
                ELSE array_append(favourites, $2::TEXT)
            END
            WHERE id = $1
            RETURNING favourites
            ",
        )
        .bind(user_id)
        .bind(item.as_str())
        .fetch_optional(&self.pool)
        .await?;

        ids.map(favourites_from_row).transpose()
    }

    async fn remove_favourite(
        &self,
        user_id: UserId,
        item: &FavouriteId,
    ) -> Result<Option<Favourites>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, Vec<String>>(
            r"
            UPDATE users
            SET favourites = array_remove(favourites, $2::TEXT)
            WHERE id = $1
            RETURNING favourites
            ",
        )
        .bind(user_id)
        .bind(item.as_str())
        .fetch_optional(&self.pool)
        .await?;

        ids.map(favourites_from_row).transpose()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
