//! User route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use cartwright_core::UserId;

use crate::error::Result;
use crate::models::User;
use crate::services::Registration;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Register a user.
///
/// POST /api/user/create
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<User>> {
    let user = state
        .users()
        .create_user(Registration {
            username: &request.username,
            password: &request.password,
            confirm_password: &request.confirm_password,
        })
        .await?;

    Ok(Json(user))
}

/// Find a user by username.
///
/// GET /api/user/{username}
#[instrument(skip(state))]
pub async fn find_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>> {
    Ok(Json(state.users().find_by_username(&username).await?))
}

/// Find a user by ID.
///
/// GET /api/user/id/{id}
#[instrument(skip(state))]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>> {
    Ok(Json(state.users().find_by_id(id).await?))
}
