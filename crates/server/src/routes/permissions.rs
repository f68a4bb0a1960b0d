use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use models::{Permission, PermissionInput};

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::routes::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Permission>> {
    let items = state.permissions.list().await;
    info!(count = items.len(), "list permissions");
    Json(items)
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PermissionInput>,
) -> Json<Permission> {
    let created = state.permissions.create(input).await;
    info!(id = created.id, "permission created");
    Json(created)
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Permission>, JsonApiError> {
    Ok(Json(state.permissions.get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    ApiJson(input): ApiJson<PermissionInput>,
) -> Result<Json<Permission>, JsonApiError> {
    Ok(Json(state.permissions.update(id, input).await?))
}

/// Delete returns the removed record so callers can see what went away.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Permission>, JsonApiError> {
    let removed = state.permissions.delete(id).await?;
    info!(id, "permission deleted");
    Ok(Json(removed))
}
