//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use cartwright_core::Order;

use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Submit the user's current cart as an order.
///
/// POST /api/order/submit/{username}
#[instrument(skip(state))]
pub async fn submit(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Order>> {
    let order = state.orders().submit(&username).await?;

    let order_id = order.id.to_string();
    add_breadcrumb("order", "Order submitted", Some(&[("order_id", order_id.as_str())]));

    Ok(Json(order))
}

/// The user's submitted orders, oldest first.
///
/// GET /api/order/history/{username}
#[instrument(skip(state))]
pub async fn history(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.orders().history(&username).await?))
}
