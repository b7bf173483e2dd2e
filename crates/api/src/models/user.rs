//! User domain type.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use cartwright_core::{Cart, UserId, Username};

/// A registered shop user (domain type).
///
/// Serializes as `{id, username}` only: the password hash and the cart are
/// never part of a user response. Carts are read through the cart endpoints.
#[derive(Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique username.
    pub username: Username,
    /// Encoded password hash (PHC string).
    pub password_hash: String,
    /// The user's cart, created empty at registration.
    pub cart: Cart,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("cart", &self.cart)
            .finish()
    }
}

impl Serialize for User {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("User", 2)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("username", &self.username)?;
        state.end()
    }
}
