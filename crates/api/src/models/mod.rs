//! Domain models owned by the API.
//!
//! Catalog, cart and order types live in `cartwright-core`; the user model
//! lives here because it carries the password hash, which never leaves this
//! crate.

pub mod user;

pub use user::User;
