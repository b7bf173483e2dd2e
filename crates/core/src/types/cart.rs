//! Shopping cart domain logic.
//!
//! A cart is an ordered list of item copies. Duplicates are how quantity is
//! represented: adding an item three times appends three copies. The total
//! is never stored; [`Cart::total`] derives it from the current items, so it
//! cannot drift out of sync with them.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{CartId, Item, ItemId, Price};

/// A user's shopping cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Items in insertion order, duplicates allowed.
    pub items: Vec<Item>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new(id: CartId) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }

    /// Create a cart holding the given items.
    #[must_use]
    pub const fn with_items(id: CartId, items: Vec<Item>) -> Self {
        Self { id, items }
    }

    /// Sum of the prices of every item currently in the cart.
    ///
    /// Saturates rather than panicking if the sum overflows; callers that
    /// grow the cart check [`Cart::checked_total`] first.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Like [`Cart::total`], but `None` if the sum overflows.
    #[must_use]
    pub fn checked_total(&self) -> Option<Price> {
        self.items
            .iter()
            .try_fold(Price::ZERO, |total, item| total.checked_add(item.price))
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries in the cart, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of copies of the given item in the cart.
    #[must_use]
    pub fn quantity_of(&self, item_id: ItemId) -> usize {
        self.items.iter().filter(|item| item.id == item_id).count()
    }

    /// Append `quantity` copies of `item`.
    pub fn add_item(&mut self, item: &Item, quantity: u32) {
        let copies = usize::try_from(quantity).unwrap_or(usize::MAX);
        self.items.extend(std::iter::repeat_n(item, copies).cloned());
    }

    /// Remove up to `quantity` copies of the item with `item_id`.
    ///
    /// Copies are taken from the back of the cart so the remaining entries
    /// keep their relative order. Asking for more copies than are present
    /// removes all of them; the excess is ignored.
    ///
    /// Returns the number of copies actually removed.
    pub fn remove_item(&mut self, item_id: ItemId, quantity: u32) -> u32 {
        let mut removed = 0_u32;
        let mut index = self.items.len();

        while removed < quantity && index > 0 {
            index -= 1;
            if self.items.get(index).is_some_and(|item| item.id == item_id) {
                self.items.remove(index);
                removed += 1;
            }
        }

        removed
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Cart", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("total", &self.total())?;
        state.end()
    }
}
