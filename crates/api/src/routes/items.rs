//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use cartwright_core::{Item, ItemId};

use crate::error::Result;
use crate::state::AppState;

/// List every item.
///
/// GET /api/item
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    Ok(Json(state.catalog().list_items().await?))
}

/// Get one item.
///
/// GET /api/item/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<ItemId>) -> Result<Json<Item>> {
    Ok(Json(state.catalog().get_item(id).await?))
}

/// Items whose name matches exactly.
///
/// GET /api/item/name/{name}
#[instrument(skip(state))]
pub async fn by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Item>>> {
    Ok(Json(state.catalog().items_by_name(&name).await?))
}
