//! Cart route handlers.
//!
//! Both operations take the same body and respond with the whole cart,
//! including its recomputed total.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use cartwright_core::{Cart, ItemId};

use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Body for both add and remove.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyCartRequest {
    pub username: String,
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Add copies of an item to a user's cart.
///
/// POST /api/cart/addToCart
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<ModifyCartRequest>,
) -> Result<Json<Cart>> {
    let cart = state
        .carts()
        .add_to_cart(&request.username, request.item_id, request.quantity)
        .await?;

    let item_id = request.item_id.to_string();
    let quantity = request.quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("item_id", item_id.as_str()), ("quantity", quantity.as_str())]),
    );

    Ok(Json(cart))
}

/// Remove copies of an item from a user's cart.
///
/// POST /api/cart/removeFromCart
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<ModifyCartRequest>,
) -> Result<Json<Cart>> {
    let cart = state
        .carts()
        .remove_from_cart(&request.username, request.item_id, request.quantity)
        .await?;

    let item_id = request.item_id.to_string();
    let quantity = request.quantity.to_string();
    add_breadcrumb(
        "cart",
        "Removed from cart",
        Some(&[("item_id", item_id.as_str()), ("quantity", quantity.as_str())]),
    );

    Ok(Json(cart))
}
