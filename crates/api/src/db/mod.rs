//! Persistence for users, the item catalog, carts and orders.
//!
//! Handlers never talk to a database directly. Each aggregate has a
//! repository trait, and [`crate::state::AppState`] holds one trait object
//! per repository, so the backing store is chosen once at startup:
//!
//! - [`users::PgUserRepository`] and friends - `PostgreSQL` via sqlx
//! - [`memory::MemoryStore`] - in-process tables for tests and local runs
//!
//! # Database: `cartwright`
//!
//! ## Tables
//!
//! - `item` - The catalog
//! - `app_user` - Registered users with their password hash
//! - `cart` - One row per user
//! - `cart_item` - Cart contents, one row per copy, ordered by `position`
//! - `user_order` - Submitted orders with their frozen total
//! - `user_order_item` - Order contents, ordered by `position`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p cartwright-cli -- migrate
//! ```

pub mod carts;
pub mod items;
pub mod memory;
pub mod orders;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use cartwright_core::{Cart, Item, ItemId, NewItem, NewOrder, Order, UserId, Username};

use crate::models::user::User;

pub use carts::PgCartRepository;
pub use items::PgItemRepository;
pub use memory::MemoryStore;
pub use orders::PgOrderRepository;
pub use users::PgUserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Storage for registered users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user, with their cart, by ID.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Get a user, with their cart, by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Create a user together with an empty cart.
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError>;
}

/// Storage for the item catalog.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, ordered by ID.
    async fn find_all(&self) -> Result<Vec<Item>, RepositoryError>;

    /// Get an item by ID.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, RepositoryError>;

    /// All items with exactly this name, ordered by ID.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>, RepositoryError>;

    /// Add an item to the catalog.
    async fn create(&self, item: NewItem) -> Result<Item, RepositoryError>;
}

/// Storage for cart contents.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Replace the stored contents of `cart` with its current items.
    ///
    /// Returns `RepositoryError::NotFound` if the cart does not exist.
    async fn save(&self, cart: &Cart) -> Result<(), RepositoryError>;
}

/// Storage for submitted orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order and assign its ID.
    async fn save(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    /// All orders submitted by `user_id`, in submission order.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to `RepositoryError::Conflict`.
fn conflict_on_unique(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(format!("{what} already exists"));
        }
    }
    RepositoryError::Database(err)
}
