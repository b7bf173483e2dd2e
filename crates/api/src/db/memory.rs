//! In-memory store for tests and local development.
//!
//! One [`MemoryStore`] implements every repository trait over a shared set of
//! tables, so clones handed to different parts of [`crate::state::AppState`]
//! observe each other's writes, just like separate repositories over one
//! database. Nothing is persisted across restarts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use cartwright_core::{
    Cart, CartId, Item, ItemId, NewItem, NewOrder, Order, OrderId, UserId, Username,
};

use super::{CartRepository, ItemRepository, OrderRepository, RepositoryError, UserRepository};
use crate::models::user::User;

#[derive(Debug, Clone)]
struct UserRecord {
    id: UserId,
    username: Username,
    password_hash: String,
    cart_id: CartId,
}

#[derive(Debug, Default)]
struct Tables {
    items: Vec<Item>,
    users: Vec<UserRecord>,
    carts: HashMap<CartId, Vec<Item>>,
    orders: Vec<Order>,
    next_item_id: i64,
    next_user_id: i64,
    next_cart_id: i64,
    next_order_id: i64,
}

impl Tables {
    fn user(&self, record: &UserRecord) -> User {
        let items = self.carts.get(&record.cart_id).cloned().unwrap_or_default();
        User {
            id: record.id,
            username: record.username.clone(),
            password_hash: record.password_hash.clone(),
            cart: Cart::with_items(record.cart_id, items),
        }
    }
}

/// Bump a sequence and return the new value. Sequences start at 1.
fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// In-memory implementation of all repository traits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose catalog already holds `items`, assigned IDs
    /// starting at 1 in the order given.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = NewItem>) -> Self {
        let store = Self::new();
        if let Ok(mut tables) = store.tables.lock() {
            for item in items {
                let id = ItemId::new(next_id(&mut tables.next_item_id));
                tables.items.push(item.with_id(id));
            }
        }
        store
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::DataCorruption("in-memory store lock poisoned".into()))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables()?;
        Ok(tables
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|record| tables.user(record)))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables()?;
        Ok(tables
            .users
            .iter()
            .find(|u| u.username.as_str() == username)
            .map(|record| tables.user(record)))
    }

    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tables = self.tables()?;

        if tables.users.iter().any(|u| &u.username == username) {
            return Err(RepositoryError::Conflict("username already exists".into()));
        }

        let record = UserRecord {
            id: UserId::new(next_id(&mut tables.next_user_id)),
            username: username.clone(),
            password_hash: password_hash.to_owned(),
            cart_id: CartId::new(next_id(&mut tables.next_cart_id)),
        };
        tables.carts.insert(record.cart_id, Vec::new());
        tables.users.push(record.clone());

        Ok(tables.user(&record))
    }
}

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Item>, RepositoryError> {
        Ok(self.tables()?.items.clone())
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        Ok(self.tables()?.items.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>, RepositoryError> {
        Ok(self
            .tables()?
            .items
            .iter()
            .filter(|i| i.name == name)
            .cloned()
            .collect())
    }

    async fn create(&self, item: NewItem) -> Result<Item, RepositoryError> {
        let mut tables = self.tables()?;
        let item = item.with_id(ItemId::new(next_id(&mut tables.next_item_id)));
        tables.items.push(item.clone());
        Ok(item)
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        let stored = tables
            .carts
            .get_mut(&cart.id)
            .ok_or(RepositoryError::NotFound)?;
        stored.clone_from(&cart.items);
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn save(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut tables = self.tables()?;
        let order = order.with_id(OrderId::new(next_id(&mut tables.next_order_id)));
        tables.orders.push(order.clone());
        Ok(order)
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .tables()?
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }
}
