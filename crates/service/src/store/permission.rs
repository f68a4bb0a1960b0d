use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use models::{Permission, PermissionInput};

use crate::errors::ServiceError;
use crate::store::alloc::IdAllocator;
use crate::store::PermissionDirectory;

#[derive(Default)]
struct PermissionState {
    items: Vec<Permission>,
    ids: IdAllocator,
}

/// Owns every permission record. One lock guards the backing collection and
/// the id allocator together, so every operation is atomic to callers.
#[derive(Default)]
pub struct PermissionStore {
    inner: RwLock<PermissionState>,
}

impl PermissionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All permissions in insertion order.
    pub async fn list(&self) -> Vec<Permission> {
        self.inner.read().await.items.clone()
    }

    pub async fn get(&self, id: u64) -> Result<Permission, ServiceError> {
        let state = self.inner.read().await;
        state
            .items
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("permission", id))
    }

    /// Allocates an id, appends the record, and returns it. Empty fields are
    /// accepted; the only server-side value is the id.
    pub async fn create(&self, input: PermissionInput) -> Permission {
        let mut state = self.inner.write().await;
        let rec = Permission { id: state.ids.next_id(), name: input.name, url: input.url };
        state.items.push(rec.clone());
        debug!(id = rec.id, "permission created");
        rec
    }

    /// Full replacement: id preserved, every other field overwritten.
    pub async fn update(
        &self,
        id: u64,
        input: PermissionInput,
    ) -> Result<Permission, ServiceError> {
        let mut state = self.inner.write().await;
        let slot = state
            .items
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found("permission", id))?;
        slot.name = input.name;
        slot.url = input.url;
        Ok(slot.clone())
    }

    /// Removes exactly one record and returns it. Survivors keep their
    /// relative order; the removed id is never reissued.
    pub async fn delete(&self, id: u64) -> Result<Permission, ServiceError> {
        let mut state = self.inner.write().await;
        let idx = state
            .items
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found("permission", id))?;
        let removed = state.items.remove(idx);
        debug!(id, "permission deleted");
        Ok(removed)
    }
}

#[async_trait]
impl PermissionDirectory for PermissionStore {
    async fn resolve(&self, ids: &[u64]) -> Result<Vec<Permission>, ServiceError> {
        let state = self.inner.read().await;
        let mut out = Vec::with_capacity(ids.len());
        for &id in ids {
            let found = state
                .items
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| ServiceError::invalid_reference("permission", id))?;
            out.push(found);
        }
        Ok(out)
    }

    async fn lookup(&self, ids: &[u64]) -> Vec<Permission> {
        let state = self.inner.read().await;
        ids.iter()
            .filter_map(|id| state.items.iter().find(|p| p.id == *id).cloned())
            .collect()
    }
}
