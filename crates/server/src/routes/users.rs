use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use models::{User, UserInput};

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::routes::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<User>> {
    let items = state.users.list().await;
    info!(count = items.len(), "list users");
    Json(items)
}

/// An unknown id in `role_id` rejects the whole create with a 400.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<UserInput>,
) -> Result<Json<User>, JsonApiError> {
    let created = state.users.create(input).await?;
    info!(id = created.id, "user created");
    Ok(Json(created))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, JsonApiError> {
    Ok(Json(state.users.get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    ApiJson(input): ApiJson<UserInput>,
) -> Result<Json<User>, JsonApiError> {
    Ok(Json(state.users.update(id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, JsonApiError> {
    let removed = state.users.delete(id).await?;
    info!(id, "user deleted");
    Ok(Json(removed))
}
