//! Todo item endpoints
//!
//! Items have no address of their own; every route goes through the parent
//! list.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};

use super::StatusMessage;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ListId, ListItemIds};
use crate::http::server::AppState;
use crate::models::ItemFields;

/// POST /todolists/{list_id}/items - append an item
async fn create_item(
    State(state): State<Arc<AppState>>,
    ListId(list_id): ListId,
    JsonBody(fields): JsonBody<ItemFields>,
) -> Result<(StatusCode, Json<StatusMessage>), ApiError> {
    let item = fields.into_new_item()?.into_item();
    let outcome = state.store.push_item(list_id, &item).await?;
    if outcome.matched == 0 {
        return Err(ApiError::list_not_found());
    }
    tracing::debug!(%list_id, item_id = %item.id, "added todo item");

    Ok((StatusCode::CREATED, StatusMessage::json("Successfully added")))
}

/// PUT /todolists/{list_id}/items/{item_id} - partial update
///
/// A request that changes no stored value is answered like a missing
/// item: both come back as 404 "No item found".
async fn update_item(
    State(state): State<Arc<AppState>>,
    ListItemIds { list_id, item_id }: ListItemIds,
    JsonBody(fields): JsonBody<ItemFields>,
) -> Result<Json<StatusMessage>, ApiError> {
    let patch = fields.into_patch()?;
    let outcome = state.store.update_item(list_id, item_id, &patch).await?;
    if outcome.matched == 0 {
        return Err(ApiError::list_not_found());
    }
    if outcome.modified == 0 {
        return Err(ApiError::item_not_found());
    }
    tracing::debug!(%list_id, %item_id, "updated todo item");

    Ok(StatusMessage::json("Successfully updated"))
}

/// DELETE /todolists/{list_id}/items/{item_id}
async fn delete_item(
    State(state): State<Arc<AppState>>,
    ListItemIds { list_id, item_id }: ListItemIds,
) -> Result<StatusCode, ApiError> {
    let outcome = state.store.pull_item(list_id, item_id).await?;
    if outcome.matched == 0 {
        return Err(ApiError::list_not_found());
    }
    if outcome.modified == 0 {
        return Err(ApiError::item_not_found());
    }
    tracing::debug!(%list_id, %item_id, "deleted todo item");

    Ok(StatusCode::NO_CONTENT)
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todolists/{list_id}/items", post(create_item))
        .route(
            "/todolists/{list_id}/items/{item_id}",
            put(update_item).delete(delete_item),
        )
}
