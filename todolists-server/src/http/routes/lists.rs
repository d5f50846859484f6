//! Todo list endpoints
//!
//! - `GET /todolists`, `POST /todolists`
//! - `GET|PUT|DELETE /todolists/{list_id}`

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::StatusMessage;
use crate::encode::Encoded;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ListId};
use crate::http::server::AppState;
use crate::models::{ListFields, TodoList};

/// GET /todolists - every list, unpaginated
async fn list_todolists(
    State(state): State<Arc<AppState>>,
) -> Result<Encoded<Vec<TodoList>>, ApiError> {
    let lists = state.store.find_all().await?;
    Ok(Encoded(lists))
}

/// POST /todolists - create an empty list
async fn create_todolist(
    State(state): State<Arc<AppState>>,
    JsonBody(fields): JsonBody<ListFields>,
) -> Result<(StatusCode, Json<StatusMessage>), ApiError> {
    let list = TodoList::new(fields.into_required_name()?);
    state.store.insert_list(&list).await?;
    tracing::debug!(list_id = %list.id, "created todo list");

    Ok((StatusCode::CREATED, StatusMessage::json("Successfully added")))
}

/// GET /todolists/{list_id} - one list with its items
async fn get_todolist(
    State(state): State<Arc<AppState>>,
    ListId(list_id): ListId,
) -> Result<Encoded<TodoList>, ApiError> {
    let list = state
        .store
        .find_list(list_id)
        .await?
        .ok_or_else(ApiError::list_not_found)?;
    Ok(Encoded(list))
}

/// PUT /todolists/{list_id} - rename; a body without `name` changes nothing
async fn update_todolist(
    State(state): State<Arc<AppState>>,
    ListId(list_id): ListId,
    JsonBody(fields): JsonBody<ListFields>,
) -> Result<Json<StatusMessage>, ApiError> {
    let name = fields.into_optional_name()?;
    let outcome = state.store.rename_list(list_id, name.as_deref()).await?;
    if outcome.matched == 0 {
        return Err(ApiError::list_not_found());
    }
    tracing::debug!(%list_id, modified = outcome.modified, "updated todo list");

    Ok(StatusMessage::json("Successfully updated"))
}

/// DELETE /todolists/{list_id} - remove the list and all its items
async fn delete_todolist(
    State(state): State<Arc<AppState>>,
    ListId(list_id): ListId,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_list(list_id).await? == 0 {
        return Err(ApiError::list_not_found());
    }
    tracing::debug!(%list_id, "deleted todo list");

    Ok(StatusCode::NO_CONTENT)
}

/// List routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todolists", get(list_todolists).post(create_todolist))
        .route(
            "/todolists/{list_id}",
            get(get_todolist)
                .put(update_todolist)
                .delete(delete_todolist),
        )
}
