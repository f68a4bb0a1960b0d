use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use models::{Role, RoleInput};

use crate::errors::JsonApiError;
use crate::extract::ApiJson;
use crate::routes::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Role>> {
    let items = state.roles.list().await;
    info!(count = items.len(), "list roles");
    Json(items)
}

/// An unknown id in `permission_id` rejects the whole create with a 400.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RoleInput>,
) -> Result<Json<Role>, JsonApiError> {
    let created = state.roles.create(input).await?;
    info!(id = created.id, "role created");
    Ok(Json(created))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Role>, JsonApiError> {
    Ok(Json(state.roles.get(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    ApiJson(input): ApiJson<RoleInput>,
) -> Result<Json<Role>, JsonApiError> {
    Ok(Json(state.roles.update(id, input).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Role>, JsonApiError> {
    let removed = state.roles.delete(id).await?;
    info!(id, "role deleted");
    Ok(Json(removed))
}
