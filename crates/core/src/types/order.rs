//! Orders: frozen snapshots of a cart.

use serde::{Deserialize, Serialize};

use super::{Cart, Item, OrderId, Price, UserId};

/// A submitted order.
///
/// Items and total are copied out of the cart at submission time and owned
/// by the order, so later cart mutations cannot reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// User who submitted the order.
    pub user_id: UserId,
    /// Items as they were in the cart.
    pub items: Vec<Item>,
    /// Cart total at submission time.
    pub total: Price,
}

/// An order that has not yet been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<Item>,
    pub total: Price,
}

impl NewOrder {
    /// Snapshot the current contents of `cart` for `user_id`.
    #[must_use]
    pub fn from_cart(user_id: UserId, cart: &Cart) -> Self {
        Self {
            user_id,
            items: cart.items.clone(),
            total: cart.total(),
        }
    }

    /// Attach the ID assigned by storage.
    #[must_use]
    pub fn with_id(self, id: OrderId) -> Order {
        Order {
            id,
            user_id: self.user_id,
            items: self.items,
            total: self.total,
        }
    }
}
