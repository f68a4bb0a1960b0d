use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::store::{
    PermissionDirectory, PermissionStore, RoleDirectory, RoleStore, UserStore,
};

pub mod permissions;
pub mod roles;
pub mod users;

/// Shared handler state: one store per entity kind, wired so roles resolve
/// against permissions and users against roles.
#[derive(Clone)]
pub struct AppState {
    pub permissions: Arc<PermissionStore>,
    pub roles: Arc<RoleStore>,
    pub users: Arc<UserStore>,
}

impl AppState {
    pub fn new() -> Self {
        let permissions = PermissionStore::new();
        let roles = RoleStore::new(Arc::clone(&permissions) as Arc<dyn PermissionDirectory>);
        let users = UserStore::new(Arc::clone(&roles) as Arc<dyn RoleDirectory>);
        Self { permissions, roles, users }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health plus the three collections.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/permissions", get(permissions::list).post(permissions::create))
        .route(
            "/permissions/:id",
            get(permissions::get_by_id)
                .put(permissions::update)
                .delete(permissions::remove),
        )
        .route("/roles", get(roles::list).post(roles::create))
        .route(
            "/roles/:id",
            get(roles::get_by_id).put(roles::update).delete(roles::remove),
        )
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:id",
            get(users::get_by_id).put(users::update).delete(users::remove),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
