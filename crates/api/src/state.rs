//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{
    CartRepository, ItemRepository, MemoryStore, OrderRepository, PgCartRepository,
    PgItemRepository, PgOrderRepository, PgUserRepository, RepositoryError, UserRepository,
};
use crate::services::{
    Argon2Hasher, CartService, CatalogService, OrderService, PasswordHasher, UserService,
};

/// One repository per aggregate, as trait objects.
pub struct Repositories {
    pub users: Box<dyn UserRepository>,
    pub items: Box<dyn ItemRepository>,
    pub carts: Box<dyn CartRepository>,
    pub orders: Box<dyn OrderRepository>,
}

impl Repositories {
    /// `PostgreSQL` repositories sharing one pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Box::new(PgUserRepository::new(pool.clone())),
            items: Box::new(PgItemRepository::new(pool.clone())),
            carts: Box::new(PgCartRepository::new(pool.clone())),
            orders: Box::new(PgOrderRepository::new(pool.clone())),
        }
    }

    /// Repositories backed by one shared in-memory store.
    #[must_use]
    pub fn in_memory(store: &MemoryStore) -> Self {
        Self {
            users: Box::new(store.clone()),
            items: Box::new(store.clone()),
            carts: Box::new(store.clone()),
            orders: Box::new(store.clone()),
        }
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Handlers build short-lived
/// services from it with [`AppState::users`], [`AppState::catalog`],
/// [`AppState::carts`] and [`AppState::orders`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: Option<PgPool>,
    repos: Repositories,
    hasher: Box<dyn PasswordHasher>,
    min_password_length: usize,
}

impl AppState {
    /// Create a new application state from arbitrary collaborators.
    #[must_use]
    pub fn new(
        repos: Repositories,
        hasher: Box<dyn PasswordHasher>,
        min_password_length: usize,
    ) -> Self {
        Self::build(None, repos, hasher, min_password_length)
    }

    /// State backed by `PostgreSQL` with Argon2 password hashing.
    #[must_use]
    pub fn postgres(pool: PgPool, min_password_length: usize) -> Self {
        let repos = Repositories::postgres(&pool);
        Self::build(
            Some(pool),
            repos,
            Box::new(Argon2Hasher::new()),
            min_password_length,
        )
    }

    /// State backed by an in-memory store with Argon2 password hashing.
    #[must_use]
    pub fn in_memory(store: &MemoryStore, min_password_length: usize) -> Self {
        Self::new(
            Repositories::in_memory(store),
            Box::new(Argon2Hasher::new()),
            min_password_length,
        )
    }

    fn build(
        pool: Option<PgPool>,
        repos: Repositories,
        hasher: Box<dyn PasswordHasher>,
        min_password_length: usize,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                repos,
                hasher,
                min_password_length,
            }),
        }
    }

    /// User registration and lookup.
    #[must_use]
    pub fn users(&self) -> UserService<'_> {
        UserService::new(
            self.inner.repos.users.as_ref(),
            self.inner.hasher.as_ref(),
            self.inner.min_password_length,
        )
    }

    /// Catalog queries.
    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self.inner.repos.items.as_ref())
    }

    /// Cart mutation.
    #[must_use]
    pub fn carts(&self) -> CartService<'_> {
        CartService::new(
            self.inner.repos.users.as_ref(),
            self.inner.repos.items.as_ref(),
            self.inner.repos.carts.as_ref(),
        )
    }

    /// Order submission and history.
    #[must_use]
    pub fn orders(&self) -> OrderService<'_> {
        OrderService::new(
            self.inner.repos.users.as_ref(),
            self.inner.repos.orders.as_ref(),
        )
    }

    /// Check that the backing store is reachable.
    ///
    /// The in-memory store is always reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the database does not answer.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        if let Some(pool) = &self.inner.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
