//! User registration and lookup.

use tracing::{info, instrument};

use cartwright_core::{UserId, Username};

use super::ServiceError;
use super::password::PasswordHasher;
use crate::db::{RepositoryError, UserRepository};
use crate::models::user::User;

/// Registration input as submitted by the client.
#[derive(Debug, Clone, Copy)]
pub struct Registration<'r> {
    pub username: &'r str,
    pub password: &'r str,
    pub confirm_password: &'r str,
}

/// User service.
///
/// Handles registration (validation, hashing, storage) and user lookups.
pub struct UserService<'a> {
    users: &'a dyn UserRepository,
    hasher: &'a dyn PasswordHasher,
    min_password_length: usize,
}

impl<'a> UserService<'a> {
    /// Create a new user service.
    #[must_use]
    pub const fn new(
        users: &'a dyn UserRepository,
        hasher: &'a dyn PasswordHasher,
        min_password_length: usize,
    ) -> Self {
        Self {
            users,
            hasher,
            min_password_length,
        }
    }

    /// Register a new user with an empty cart.
    ///
    /// Only the hash of the password is stored.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the username is malformed, the
    /// password is too short, or the confirmation does not match.
    /// Returns `ServiceError::UsernameTaken` if the username is registered.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn create_user(&self, registration: Registration<'_>) -> Result<User, ServiceError> {
        let username = Username::parse(registration.username)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        self.validate_password(registration.password, registration.confirm_password)?;

        let password_hash = self
            .hasher
            .hash(registration.password)
            .map_err(|_| ServiceError::PasswordHash)?;

        let user = self
            .users
            .create(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => ServiceError::UsernameTaken,
                other => ServiceError::Repository(other),
            })?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Get a user by username.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UserNotFound` if no such user exists.
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<User, ServiceError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(username.to_owned()))
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UserNotFound` if no such user exists.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: UserId) -> Result<User, ServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::UserNotFound(id.to_string()))
    }

    /// Validate password meets requirements.
    fn validate_password(&self, password: &str, confirm_password: &str) -> Result<(), ServiceError> {
        if password.chars().count() < self.min_password_length {
            return Err(ServiceError::Validation(format!(
                "password must be at least {} characters",
                self.min_password_length
            )));
        }

        if password != confirm_password {
            return Err(ServiceError::Validation(
                "password and confirmation do not match".to_string(),
            ));
        }

        Ok(())
    }
}
