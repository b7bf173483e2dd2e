//! Service error types.

use thiserror::Error;

use cartwright_core::ItemId;

use crate::db::RepositoryError;

/// Errors that can occur in the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No user with the given username or ID.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// No catalog item with the given ID.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// No catalog item with the given name.
    #[error("no items named {0:?}")]
    NoItemsNamed(String),

    /// Request input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Username is already registered.
    #[error("username already taken")]
    UsernameTaken,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
