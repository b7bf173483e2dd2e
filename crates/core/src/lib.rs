//! Cartwright Core - Shared domain types.
//!
//! This crate provides the types used across all Cartwright components:
//! - `api` - HTTP service for users, catalog, carts and orders
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain logic - no I/O, no
//! database access, no HTTP. Cart arithmetic and order snapshots live here so
//! every storage backend shares one implementation.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, prices, usernames, items, carts and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
