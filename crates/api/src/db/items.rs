//! Item catalog repository backed by `PostgreSQL`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};

use cartwright_core::{Item, ItemId, NewItem, Price};

use super::{ItemRepository, RepositoryError};

/// A row from `cartwright.item` (or an order line carrying the same columns).
#[derive(Debug, sqlx::FromRow)]
pub(super) struct ItemRow {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: Price::new(row.price),
        }
    }
}

/// `PostgreSQL` implementation of [`ItemRepository`].
#[derive(Debug, Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove every item from the catalog.
    ///
    /// Cart lines referencing the removed items are deleted with them;
    /// submitted orders keep their own copies.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query::<sqlx::Postgres>("DELETE FROM cartwright.item")
            .execute(&self.pool)
            .await?;

        debug!(count = result.rows_affected(), "Cleared catalog");
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Item>, RepositoryError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r"
            SELECT id, name, description, price
            FROM cartwright.item
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let row: Option<ItemRow> = sqlx::query_as(
            r"
            SELECT id, name, description, price
            FROM cartwright.item
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>, RepositoryError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r"
            SELECT id, name, description, price
            FROM cartwright.item
            WHERE name = $1
            ORDER BY id
            ",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    async fn create(&self, item: NewItem) -> Result<Item, RepositoryError> {
        let (id,): (ItemId,) = sqlx::query_as(
            r"
            INSERT INTO cartwright.item (name, description, price)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price.amount())
        .fetch_one(&self.pool)
        .await?;

        debug!(%id, "Inserted item");
        Ok(item.with_id(id))
    }
}
