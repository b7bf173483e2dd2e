//! Cart mutation.

use tracing::{info, instrument};

use cartwright_core::{Cart, Item, ItemId};

use super::ServiceError;
use crate::db::{CartRepository, ItemRepository, UserRepository};
use crate::models::user::User;

/// Most copies of one item a single add may append.
pub const MAX_ADD_QUANTITY: u32 = 1000;

/// Cart service.
pub struct CartService<'a> {
    users: &'a dyn UserRepository,
    items: &'a dyn ItemRepository,
    carts: &'a dyn CartRepository,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(
        users: &'a dyn UserRepository,
        items: &'a dyn ItemRepository,
        carts: &'a dyn CartRepository,
    ) -> Self {
        Self {
            users,
            items,
            carts,
        }
    }

    /// Append `quantity` copies of an item to the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UserNotFound` or `ServiceError::ItemNotFound`
    /// if either side of the request does not exist (the user is checked
    /// first). Returns `ServiceError::Validation` if `quantity` exceeds
    /// [`MAX_ADD_QUANTITY`] or the cart total would overflow; the stored
    /// cart is left untouched in both cases.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        username: &str,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<Cart, ServiceError> {
        if quantity > MAX_ADD_QUANTITY {
            return Err(ServiceError::Validation(format!(
                "quantity must be at most {MAX_ADD_QUANTITY}"
            )));
        }

        let (user, item) = self.resolve(username, item_id).await?;
        let mut cart = user.cart;

        cart.add_item(&item, quantity);
        if cart.checked_total().is_none() {
            return Err(ServiceError::Validation(
                "cart total is too large".to_owned(),
            ));
        }
        self.carts.save(&cart).await?;

        info!(cart_id = %cart.id, total = %cart.total(), "Added to cart");
        Ok(cart)
    }

    /// Remove up to `quantity` copies of an item from the user's cart.
    ///
    /// Removing more copies than the cart holds empties it of that item.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UserNotFound` or `ServiceError::ItemNotFound`
    /// if either side of the request does not exist.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        username: &str,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<Cart, ServiceError> {
        let (user, item) = self.resolve(username, item_id).await?;
        let mut cart = user.cart;

        let removed = cart.remove_item(item.id, quantity);
        if removed > 0 {
            self.carts.save(&cart).await?;
        }

        info!(cart_id = %cart.id, removed, total = %cart.total(), "Removed from cart");
        Ok(cart)
    }

    async fn resolve(&self, username: &str, item_id: ItemId) -> Result<(User, Item), ServiceError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(username.to_owned()))?;

        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or(ServiceError::ItemNotFound(item_id))?;

        Ok((user, item))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwright_core::{NewItem, Price};
    use rust_decimal::Decimal;

    use super::*;
    use crate::db::MemoryStore;
    use crate::services::test_support::{register, widget_store};

    const ROUND: ItemId = ItemId::new(1);
    const SQUARE: ItemId = ItemId::new(2);

    #[tokio::test]
    async fn test_add_to_cart_appends_and_persists() {
        let store = widget_store();
        register(&store, "Sarah").await;
        let service = CartService::new(&store, &store, &store);

        let cart = service.add_to_cart("Sarah", ROUND, 2).await.unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Price::from_cents(598));

        let stored = store.find_by_username("Sarah").await.unwrap().unwrap();
        assert_eq!(stored.cart, cart);
    }

    #[tokio::test]
    async fn test_add_accumulates_across_calls() {
        let store = widget_store();
        register(&store, "Sarah").await;
        let service = CartService::new(&store, &store, &store);

        service.add_to_cart("Sarah", ROUND, 1).await.unwrap();
        let cart = service.add_to_cart("Sarah", SQUARE, 1).await.unwrap();

        assert_eq!(cart.total(), Price::from_cents(498));
    }

    #[tokio::test]
    async fn test_unknown_user_is_reported_before_unknown_item() {
        let store = widget_store();
        let service = CartService::new(&store, &store, &store);

        let err = service
            .add_to_cart("Nobody", ItemId::new(99), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_item_leaves_cart_unchanged() {
        let store = widget_store();
        register(&store, "Sarah").await;
        let service = CartService::new(&store, &store, &store);
        service.add_to_cart("Sarah", ROUND, 1).await.unwrap();

        let err = service
            .add_to_cart("Sarah", ItemId::new(99), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ItemNotFound(_)));

        let stored = store.find_by_username("Sarah").await.unwrap().unwrap();
        assert_eq!(stored.cart.len(), 1);
    }

    #[tokio::test]
    async fn test_add_over_cap_is_rejected() {
        let store = widget_store();
        register(&store, "Sarah").await;
        let service = CartService::new(&store, &store, &store);

        let err = service
            .add_to_cart("Sarah", ROUND, MAX_ADD_QUANTITY + 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let cart = service
            .add_to_cart("Sarah", ROUND, MAX_ADD_QUANTITY)
            .await
            .unwrap();
        assert_eq!(cart.len(), 1000);
    }

    #[tokio::test]
    async fn test_remove_excess_is_noop_for_the_rest() {
        let store = widget_store();
        register(&store, "Sarah").await;
        let service = CartService::new(&store, &store, &store);
        service.add_to_cart("Sarah", ROUND, 2).await.unwrap();
        service.add_to_cart("Sarah", SQUARE, 1).await.unwrap();

        let cart = service.remove_from_cart("Sarah", ROUND, 5).await.unwrap();

        assert_eq!(cart.quantity_of(ROUND), 0);
        assert_eq!(cart.quantity_of(SQUARE), 1);
        assert_eq!(cart.total(), Price::from_cents(199));
    }

    #[tokio::test]
    async fn test_remove_item_not_in_cart_returns_cart() {
        let store = widget_store();
        register(&store, "Sarah").await;
        let service = CartService::new(&store, &store, &store);
        service.add_to_cart("Sarah", ROUND, 1).await.unwrap();

        let cart = service.remove_from_cart("Sarah", SQUARE, 1).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Price::from_cents(299));
    }

    #[tokio::test]
    async fn test_remove_requires_existing_item() {
        let store = widget_store();
        register(&store, "Sarah").await;
        let service = CartService::new(&store, &store, &store);

        assert!(matches!(
            service.remove_from_cart("Sarah", ItemId::new(7), 1).await,
            Err(ServiceError::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_add_that_would_overflow_total_is_rejected() {
        let store = MemoryStore::with_items([NewItem {
            name: "Priceless Widget".to_string(),
            description: String::new(),
            price: Price::new(Decimal::MAX),
        }]);
        register(&store, "Sarah").await;
        let service = CartService::new(&store, &store, &store);
        let priceless = ItemId::new(1);

        service.add_to_cart("Sarah", priceless, 1).await.unwrap();
        let err = service
            .add_to_cart("Sarah", priceless, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let stored = store.find_by_username("Sarah").await.unwrap().unwrap();
        assert_eq!(stored.cart.len(), 1);
    }
}
