//! Shared fixtures for service unit tests.

use cartwright_core::{NewItem, Price, UserId};

use super::password::{PasswordHashError, PasswordHasher};
use crate::db::{MemoryStore, UserRepository};

/// Hasher that stores the reversed password. Argon2 is too slow for the
/// volume of registrations the unit tests perform.
pub struct ReversingHasher;

impl PasswordHasher for ReversingHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(password.chars().rev().collect())
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        password.chars().rev().eq(hash.chars())
    }
}

/// A store seeded with Round Widget (id 1) and Square Widget (id 2).
pub fn widget_store() -> MemoryStore {
    MemoryStore::with_items([
        NewItem {
            name: "Round Widget".to_string(),
            description: "A widget that is round".to_string(),
            price: Price::from_cents(299),
        },
        NewItem {
            name: "Square Widget".to_string(),
            description: "A widget that is square".to_string(),
            price: Price::from_cents(199),
        },
    ])
}

/// Register `username` directly through the repository.
#[allow(clippy::unwrap_used)]
pub async fn register(store: &MemoryStore, username: &str) -> UserId {
    let username = cartwright_core::Username::parse(username).unwrap();
    UserRepository::create(store, &username, "hash")
        .await
        .unwrap()
        .id
}
