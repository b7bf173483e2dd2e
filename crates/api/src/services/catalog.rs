//! Read-only access to the item catalog.

use tracing::instrument;

use cartwright_core::{Item, ItemId};

use super::ServiceError;
use crate::db::ItemRepository;

/// Catalog service.
pub struct CatalogService<'a> {
    items: &'a dyn ItemRepository,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(items: &'a dyn ItemRepository) -> Self {
        Self { items }
    }

    /// List every item in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.items.find_all().await?)
    }

    /// Get a single item.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::ItemNotFound` if no such item exists.
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: ItemId) -> Result<Item, ServiceError> {
        self.items
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::ItemNotFound(id))
    }

    /// Get every item whose name matches exactly.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NoItemsNamed` when nothing matches.
    #[instrument(skip(self))]
    pub async fn items_by_name(&self, name: &str) -> Result<Vec<Item>, ServiceError> {
        let items = self.items.find_by_name(name).await?;
        if items.is_empty() {
            return Err(ServiceError::NoItemsNamed(name.to_owned()));
        }
        Ok(items)
    }
}
