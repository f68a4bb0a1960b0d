use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use models::{Role, RoleInput};

use crate::errors::ServiceError;
use crate::store::alloc::IdAllocator;
use crate::store::{PermissionDirectory, RoleDirectory};

/// Stored form of a role. Permissions are held as ids and joined against the
/// permission store when a view is built, never as positions or pointers
/// into another store's collection.
#[derive(Clone, Debug)]
struct RoleRecord {
    id: u64,
    name: String,
    permission_ids: Vec<u64>,
}

#[derive(Default)]
struct RoleState {
    items: Vec<RoleRecord>,
    ids: IdAllocator,
}

/// Owns every role record. Writes resolve the referenced permission ids
/// up front; if any id is unknown the whole write is rejected and the store
/// is left untouched.
pub struct RoleStore {
    inner: RwLock<RoleState>,
    permissions: Arc<dyn PermissionDirectory>,
}

impl RoleStore {
    pub fn new(permissions: Arc<dyn PermissionDirectory>) -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(RoleState::default()), permissions })
    }

    async fn view(&self, rec: &RoleRecord) -> Role {
        Role {
            id: rec.id,
            name: rec.name.clone(),
            permissions: self.permissions.lookup(&rec.permission_ids).await,
        }
    }

    /// All roles in insertion order, permissions materialized at read time.
    pub async fn list(&self) -> Vec<Role> {
        let state = self.inner.read().await;
        let mut out = Vec::with_capacity(state.items.len());
        for rec in &state.items {
            out.push(self.view(rec).await);
        }
        out
    }

    pub async fn get(&self, id: u64) -> Result<Role, ServiceError> {
        let state = self.inner.read().await;
        let rec = state
            .items
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ServiceError::not_found("role", id))?;
        Ok(self.view(rec).await)
    }

    /// Resolves every permission id before touching own state, so a failed
    /// resolution leaves the store exactly as it was. Duplicates and order
    /// in the input are preserved; an empty sequence is valid.
    pub async fn create(&self, input: RoleInput) -> Result<Role, ServiceError> {
        let permissions = self.permissions.resolve(&input.permission_id).await?;
        let mut state = self.inner.write().await;
        let id = state.ids.next_id();
        state.items.push(RoleRecord {
            id,
            name: input.name.clone(),
            permission_ids: input.permission_id,
        });
        debug!(id, "role created");
        Ok(Role { id, name: input.name, permissions })
    }

    /// Full replacement with the same resolution contract as `create`.
    pub async fn update(&self, id: u64, input: RoleInput) -> Result<Role, ServiceError> {
        let permissions = self.permissions.resolve(&input.permission_id).await?;
        let mut state = self.inner.write().await;
        let rec = state
            .items
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ServiceError::not_found("role", id))?;
        rec.name = input.name;
        rec.permission_ids = input.permission_id;
        Ok(Role { id, name: rec.name.clone(), permissions })
    }

    /// Removes the role and returns its final view. Users referencing this
    /// role keep their stored ids; there is no cascade.
    pub async fn delete(&self, id: u64) -> Result<Role, ServiceError> {
        let removed = {
            let mut state = self.inner.write().await;
            let idx = state
                .items
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| ServiceError::not_found("role", id))?;
            state.items.remove(idx)
        };
        debug!(id, "role deleted");
        Ok(self.view(&removed).await)
    }
}

#[async_trait]
impl RoleDirectory for RoleStore {
    async fn resolve(&self, ids: &[u64]) -> Result<Vec<Role>, ServiceError> {
        let state = self.inner.read().await;
        let mut out = Vec::with_capacity(ids.len());
        for &id in ids {
            let rec = state
                .items
                .iter()
                .find(|r| r.id == id)
                .ok_or_else(|| ServiceError::invalid_reference("role", id))?;
            out.push(self.view(rec).await);
        }
        Ok(out)
    }

    async fn lookup(&self, ids: &[u64]) -> Vec<Role> {
        let state = self.inner.read().await;
        let mut out = Vec::new();
        for id in ids {
            if let Some(rec) = state.items.iter().find(|r| r.id == *id) {
                out.push(self.view(rec).await);
            }
        }
        out
    }
}
