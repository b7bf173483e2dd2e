//! Core types for Cartwright.
//!
//! This module provides type-safe wrappers for the shop's domain concepts.

pub mod cart;
pub mod id;
pub mod item;
pub mod order;
pub mod price;
pub mod username;

pub use cart::Cart;
pub use id::*;
pub use item::{Item, NewItem};
pub use order::{NewOrder, Order};
pub use price::Price;
pub use username::{Username, UsernameError};
