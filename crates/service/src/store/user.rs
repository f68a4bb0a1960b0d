use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use models::{User, UserInput};

use crate::errors::ServiceError;
use crate::store::alloc::IdAllocator;
use crate::store::RoleDirectory;

/// Stored form of a user; roles are held as ids, same contract as
/// role -> permission one layer down.
#[derive(Clone, Debug)]
struct UserRecord {
    id: u64,
    name: String,
    username: String,
    password: String,
    role_ids: Vec<u64>,
}

#[derive(Default)]
struct UserState {
    items: Vec<UserRecord>,
    ids: IdAllocator,
}

/// Owns every user record. Credentials are stored verbatim: this service
/// manages RBAC data, it does not authenticate anyone.
pub struct UserStore {
    inner: RwLock<UserState>,
    roles: Arc<dyn RoleDirectory>,
}

impl UserStore {
    pub fn new(roles: Arc<dyn RoleDirectory>) -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(UserState::default()), roles })
    }

    async fn view(&self, rec: &UserRecord) -> User {
        User {
            id: rec.id,
            name: rec.name.clone(),
            username: rec.username.clone(),
            password: rec.password.clone(),
            roles: self.roles.lookup(&rec.role_ids).await,
        }
    }

    /// All users in insertion order, roles materialized at read time.
    pub async fn list(&self) -> Vec<User> {
        let state = self.inner.read().await;
        let mut out = Vec::with_capacity(state.items.len());
        for rec in &state.items {
            out.push(self.view(rec).await);
        }
        out
    }

    pub async fn get(&self, id: u64) -> Result<User, ServiceError> {
        let state = self.inner.read().await;
        let rec = state
            .items
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| ServiceError::not_found("user", id))?;
        Ok(self.view(rec).await)
    }

    /// Resolves every role id before touching own state; a failed resolution
    /// leaves the store untouched. Duplicates and order are preserved and an
    /// empty sequence is valid.
    pub async fn create(&self, input: UserInput) -> Result<User, ServiceError> {
        let roles = self.roles.resolve(&input.role_id).await?;
        let mut state = self.inner.write().await;
        let id = state.ids.next_id();
        state.items.push(UserRecord {
            id,
            name: input.name.clone(),
            username: input.username.clone(),
            password: input.password.clone(),
            role_ids: input.role_id,
        });
        debug!(id, "user created");
        Ok(User {
            id,
            name: input.name,
            username: input.username,
            password: input.password,
            roles,
        })
    }

    /// Full replacement with the same resolution contract as `create`.
    pub async fn update(&self, id: u64, input: UserInput) -> Result<User, ServiceError> {
        let roles = self.roles.resolve(&input.role_id).await?;
        let mut state = self.inner.write().await;
        let rec = state
            .items
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| ServiceError::not_found("user", id))?;
        rec.name = input.name;
        rec.username = input.username;
        rec.password = input.password;
        rec.role_ids = input.role_id;
        Ok(User {
            id,
            name: rec.name.clone(),
            username: rec.username.clone(),
            password: rec.password.clone(),
            roles,
        })
    }

    /// Removes the user and returns its final view.
    pub async fn delete(&self, id: u64) -> Result<User, ServiceError> {
        let removed = {
            let mut state = self.inner.write().await;
            let idx = state
                .items
                .iter()
                .position(|u| u.id == id)
                .ok_or_else(|| ServiceError::not_found("user", id))?;
            state.items.remove(idx)
        };
        debug!(id, "user deleted");
        Ok(self.view(&removed).await)
    }
}
