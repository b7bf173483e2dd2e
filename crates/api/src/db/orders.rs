//! Order repository backed by `PostgreSQL`.
//!
//! Order lines are stored with their own copy of each item's name,
//! description and price, so an order reads back exactly as it was
//! submitted regardless of later catalog changes.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};

use cartwright_core::{Item, NewOrder, Order, OrderId, Price, UserId};

use super::items::ItemRow;
use super::{OrderRepository, RepositoryError};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    total: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    order_id: OrderId,
    #[sqlx(flatten)]
    item: ItemRow,
}

/// `PostgreSQL` implementation of [`OrderRepository`].
#[derive(Debug, Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    #[instrument(skip(self, order), fields(user_id = %order.user_id, items = order.items.len()))]
    async fn save(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (OrderId,) = sqlx::query_as(
            r"
            INSERT INTO cartwright.user_order (user_id, total)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(order.user_id)
        .bind(order.total.amount())
        .fetch_one(&mut *tx)
        .await?;

        if !order.items.is_empty() {
            let item_ids: Vec<i64> = order.items.iter().map(|i| i.id.as_i64()).collect();
            let names: Vec<&str> = order.items.iter().map(|i| i.name.as_str()).collect();
            let descriptions: Vec<&str> =
                order.items.iter().map(|i| i.description.as_str()).collect();
            let prices: Vec<Decimal> = order.items.iter().map(|i| i.price.amount()).collect();

            sqlx::query::<sqlx::Postgres>(
                r"
                INSERT INTO cartwright.user_order_item
                    (order_id, position, item_id, name, description, price)
                SELECT $1, t.position, t.item_id, t.name, t.description, t.price
                FROM UNNEST($2::BIGINT[], $3::TEXT[], $4::TEXT[], $5::NUMERIC[])
                    WITH ORDINALITY AS t(item_id, name, description, price, position)
                ",
            )
            .bind(id)
            .bind(&item_ids)
            .bind(&names)
            .bind(&descriptions)
            .bind(&prices)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(%id, "Saved order");
        Ok(order.with_id(id))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders: Vec<OrderRow> = sqlx::query_as(
            r"
            SELECT id, user_id, total
            FROM cartwright.user_order
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i64> = orders.iter().map(|o| o.id.as_i64()).collect();
        let lines: Vec<OrderLineRow> = sqlx::query_as(
            r"
            SELECT order_id, item_id AS id, name, description, price
            FROM cartwright.user_order_item
            WHERE order_id = ANY($1)
            ORDER BY order_id, position
            ",
        )
        .bind(&order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_order: HashMap<OrderId, Vec<Item>> = HashMap::new();
        for line in lines {
            items_by_order
                .entry(line.order_id)
                .or_default()
                .push(Item::from(line.item));
        }

        Ok(orders
            .into_iter()
            .map(|row| Order {
                id: row.id,
                user_id: row.user_id,
                items: items_by_order.remove(&row.id).unwrap_or_default(),
                total: Price::new(row.total),
            })
            .collect())
    }
}
