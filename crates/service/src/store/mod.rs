use async_trait::async_trait;

use models::{Permission, Role};

use crate::errors::ServiceError;

pub mod alloc;
pub mod permission;
pub mod role;
pub mod user;

pub use permission::PermissionStore;
pub use role::RoleStore;
pub use user::UserStore;

/// Read capability a dependent store needs from the permission store.
/// Concrete stores implement this; tests can substitute doubles.
#[async_trait]
pub trait PermissionDirectory: Send + Sync {
    /// Resolve every id, in input order, or fail with `InvalidReference` on
    /// the first unknown one. A single call covers the whole sequence, so
    /// resolution is one atomic read of the backing collection.
    async fn resolve(&self, ids: &[u64]) -> Result<Vec<Permission>, ServiceError>;

    /// Current values for the ids that still exist, preserving input order
    /// and duplicates. Missing ids are skipped rather than errors: a
    /// referent deleted after the reference was written lands here.
    async fn lookup(&self, ids: &[u64]) -> Vec<Permission>;
}

/// Same capability one layer up: what the user store needs from the role
/// store.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn resolve(&self, ids: &[u64]) -> Result<Vec<Role>, ServiceError>;
    async fn lookup(&self, ids: &[u64]) -> Vec<Role>;
}
