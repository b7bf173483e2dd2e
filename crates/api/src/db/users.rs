//! User repository backed by `PostgreSQL`.
//!
//! A user row is always paired with exactly one cart row; both are created in
//! the same transaction and loaded together.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use cartwright_core::{Cart, CartId, UserId, Username};

use super::carts::load_items;
use super::{RepositoryError, UserRepository, conflict_on_unique};
use crate::models::user::User;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    username: Username,
    password_hash: String,
    cart_id: CartId,
}

/// `PostgreSQL` implementation of [`UserRepository`].
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach the user's cart contents to a row.
    async fn hydrate(&self, row: UserRow) -> Result<User, RepositoryError> {
        let items = load_items(&self.pool, row.cart_id).await?;

        Ok(User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            cart: Cart::with_items(row.cart_id, items),
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT u.id, u.username, u.password_hash, c.id AS cart_id
            FROM cartwright.app_user u
            JOIN cartwright.cart c ON c.user_id = u.id
            WHERE u.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT u.id, u.username, u.password_hash, c.id AS cart_id
            FROM cartwright.app_user u
            JOIN cartwright.cart c ON c.user_id = u.id
            WHERE u.username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, password_hash))]
    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (UserId,) = sqlx::query_as(
            r"
            INSERT INTO cartwright.app_user (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "username"))?;

        let (cart_id,): (CartId,) = sqlx::query_as(
            r"
            INSERT INTO cartwright.cart (user_id)
            VALUES ($1)
            RETURNING id
            ",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(%id, %cart_id, "Created user");
        Ok(User {
            id,
            username: username.clone(),
            password_hash: password_hash.to_owned(),
            cart: Cart::new(cart_id),
        })
    }
}
