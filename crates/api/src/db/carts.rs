//! Cart repository backed by `PostgreSQL`.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::{debug, instrument};

use cartwright_core::{Cart, CartId, Item};

use super::items::ItemRow;
use super::{CartRepository, RepositoryError};

/// `PostgreSQL` implementation of [`CartRepository`].
#[derive(Debug, Clone)]
pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Load the items of a cart in cart order.
pub(super) async fn load_items<'e, E>(
    executor: E,
    cart_id: CartId,
) -> Result<Vec<Item>, RepositoryError>
where
    E: PgExecutor<'e>,
{
    let rows: Vec<ItemRow> = sqlx::query_as(
        r"
        SELECT i.id, i.name, i.description, i.price
        FROM cartwright.cart_item ci
        JOIN cartwright.item i ON i.id = ci.item_id
        WHERE ci.cart_id = $1
        ORDER BY ci.position
        ",
    )
    .bind(cart_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(Item::from).collect())
}

#[async_trait]
impl CartRepository for PgCartRepository {
    #[instrument(skip(self, cart), fields(cart_id = %cart.id, items = cart.len()))]
    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM cartwright.cart WHERE id = $1)")
                .bind(cart.id)
                .fetch_one(&mut *tx)
                .await?;

        if !exists {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query::<sqlx::Postgres>("DELETE FROM cartwright.cart_item WHERE cart_id = $1")
            .bind(cart.id)
            .execute(&mut *tx)
            .await?;

        let item_ids: Vec<i64> = cart.items.iter().map(|item| item.id.as_i64()).collect();
        if !item_ids.is_empty() {
            sqlx::query::<sqlx::Postgres>(
                r"
                INSERT INTO cartwright.cart_item (cart_id, position, item_id)
                SELECT $1, t.position, t.item_id
                FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS t(item_id, position)
                ",
            )
            .bind(cart.id)
            .bind(&item_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!("Saved cart");
        Ok(())
    }
}

