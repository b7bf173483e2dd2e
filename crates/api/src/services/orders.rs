//! Order submission and history.

use tracing::{info, instrument};

use cartwright_core::{NewOrder, Order};

use super::ServiceError;
use crate::db::{OrderRepository, UserRepository};
use crate::models::user::User;

/// Order service.
pub struct OrderService<'a> {
    users: &'a dyn UserRepository,
    orders: &'a dyn OrderRepository,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(users: &'a dyn UserRepository, orders: &'a dyn OrderRepository) -> Self {
        Self { users, orders }
    }

    /// Turn the user's current cart into an order.
    ///
    /// The cart itself is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UserNotFound` if no such user exists.
    #[instrument(skip(self))]
    pub async fn submit(&self, username: &str) -> Result<Order, ServiceError> {
        let user = self.user(username).await?;

        let order = self
            .orders
            .save(NewOrder::from_cart(user.id, &user.cart))
            .await?;

        info!(
            order_id = %order.id,
            items = order.items.len(),
            total = %order.total,
            "Order submitted"
        );
        Ok(order)
    }

    /// Every order the user has submitted, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UserNotFound` if no such user exists.
    #[instrument(skip(self))]
    pub async fn history(&self, username: &str) -> Result<Vec<Order>, ServiceError> {
        let user = self.user(username).await?;
        Ok(self.orders.find_by_user(user.id).await?)
    }

    async fn user(&self, username: &str) -> Result<User, ServiceError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(username.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use cartwright_core::{ItemId, Price};

    use super::*;
    use crate::services::CartService;
    use crate::services::test_support::{register, widget_store};

    #[tokio::test]
    async fn test_submit_snapshots_cart() {
        let store = widget_store();
        let user_id = register(&store, "Sarah").await;
        let carts = CartService::new(&store, &store, &store);
        carts.add_to_cart("Sarah", ItemId::new(1), 1).await.unwrap();

        let orders = OrderService::new(&store, &store);
        let order = orders.submit("Sarah").await.unwrap();

        assert_eq!(order.user_id, user_id);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].id, ItemId::new(1));
        assert_eq!(order.total, Price::from_cents(299));
    }

    #[tokio::test]
    async fn test_order_survives_later_cart_changes() {
        let store = widget_store();
        register(&store, "Sarah").await;
        let carts = CartService::new(&store, &store, &store);
        let orders = OrderService::new(&store, &store);

        carts.add_to_cart("Sarah", ItemId::new(1), 1).await.unwrap();
        orders.submit("Sarah").await.unwrap();
        carts
            .remove_from_cart("Sarah", ItemId::new(1), 1)
            .await
            .unwrap();

        let history = orders.history("Sarah").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].total, Price::from_cents(299));
        assert_eq!(history[0].items.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_keeps_cart_contents() {
        let store = widget_store();
        register(&store, "Sarah").await;
        let carts = CartService::new(&store, &store, &store);
        carts.add_to_cart("Sarah", ItemId::new(2), 2).await.unwrap();

        OrderService::new(&store, &store)
            .submit("Sarah")
            .await
            .unwrap();

        let user = store.find_by_username("Sarah").await.unwrap().unwrap();
        assert_eq!(user.cart.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_empty_cart() {
        let store = widget_store();
        register(&store, "Sarah").await;

        let order = OrderService::new(&store, &store)
            .submit("Sarah")
            .await
            .unwrap();

        assert!(order.items.is_empty());
        assert_eq!(order.total, Price::ZERO);
    }

    #[tokio::test]
    async fn test_history_is_per_user_and_ordered() {
        let store = widget_store();
        register(&store, "Sarah").await;
        register(&store, "Lati").await;
        let carts = CartService::new(&store, &store, &store);
        let orders = OrderService::new(&store, &store);

        carts.add_to_cart("Sarah", ItemId::new(1), 1).await.unwrap();
        let first = orders.submit("Sarah").await.unwrap();
        orders.submit("Lati").await.unwrap();
        carts.add_to_cart("Sarah", ItemId::new(2), 1).await.unwrap();
        let second = orders.submit("Sarah").await.unwrap();

        let history = orders.history("Sarah").await.unwrap();
        let ids: Vec<_> = history.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(history[1].total, Price::from_cents(498));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let store = widget_store();
        let orders = OrderService::new(&store, &store);

        assert!(matches!(
            orders.submit("Nobody").await,
            Err(ServiceError::UserNotFound(_))
        ));
        assert!(matches!(
            orders.history("Nobody").await,
            Err(ServiceError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_history_empty_for_new_user() {
        let store = widget_store();
        register(&store, "Sarah").await;
        assert!(
            OrderService::new(&store, &store)
                .history("Sarah")
                .await
                .unwrap()
                .is_empty()
        );
    }
}
