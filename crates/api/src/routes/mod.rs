//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (store reachable)
//!
//! # Users
//! POST /api/user/create              - Register a user
//! GET  /api/user/{username}          - Find user by username
//! GET  /api/user/id/{id}             - Find user by ID
//!
//! # Items
//! GET  /api/item                     - List the catalog
//! GET  /api/item/{id}                - Get one item
//! GET  /api/item/name/{name}         - Items with exactly this name
//!
//! # Cart
//! POST /api/cart/addToCart           - Add copies of an item
//! POST /api/cart/removeFromCart      - Remove copies of an item
//!
//! # Orders
//! POST /api/order/submit/{username}  - Submit the user's cart as an order
//! GET  /api/order/history/{username} - The user's orders
//! ```
//!
//! Every body in and out is JSON. Failures return a bare status code.

pub mod cart;
pub mod items;
pub mod orders;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(users::create))
        .route("/{username}", get(users::find_by_username))
        .route("/id/{id}", get(users::find_by_id))
}

/// Create the item routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(items::index))
        .route("/{id}", get(items::show))
        .route("/name/{name}", get(items::by_name))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/addToCart", post(cart::add))
        .route("/removeFromCart", post(cart::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/submit/{username}", post(orders::submit))
        .route("/history/{username}", get(orders::history))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/user", user_routes())
        .nest("/api/item", item_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/order", order_routes())
}
