//! Catalog items.

use serde::{Deserialize, Serialize};

use super::{ItemId, Price};

/// A purchasable item from the catalog.
///
/// Items are immutable once created. Carts and orders hold copies, so two
/// entries for the same item compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Display name. Not unique; several items may share a name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price.
    pub price: Price,
}

/// An item that has not yet been assigned an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub price: Price,
}

impl NewItem {
    /// Attach the ID assigned by storage.
    #[must_use]
    pub fn with_id(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}
