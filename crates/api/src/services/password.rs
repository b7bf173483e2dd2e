//! Password hashing.
//!
//! Registration only ever sees a [`PasswordHasher`] trait object, so the
//! algorithm can be swapped (or replaced with a cheap stand-in in tests)
//! without touching the user service.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;

/// Hashing failed (bad parameters or RNG failure).
#[derive(Debug, Error)]
#[error("password hashing failed")]
pub struct PasswordHashError;

/// Turns plaintext passwords into storable hashes.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into an encoded string safe to store.
    ///
    /// # Errors
    ///
    /// Returns `PasswordHashError` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a hash produced by [`Self::hash`].
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Create a hasher with default Argon2id parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| PasswordHashError)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
