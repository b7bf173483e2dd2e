//! Business logic services.
//!
//! Services borrow repository trait objects from [`crate::state::AppState`]
//! for the duration of a request. They own validation and orchestration;
//! the repositories only move data.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod orders;
pub mod password;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use error::ServiceError;
pub use orders::OrderService;
pub use password::{Argon2Hasher, PasswordHashError, PasswordHasher};
pub use users::{Registration, UserService};
