use serde::{Deserialize, Serialize};

use crate::permission::Permission;

/// Read-side shape of a role. `permissions` is materialized from the
/// permission store at read time, so it always reflects current data.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: u64,
    pub name: String,
    pub permissions: Vec<Permission>,
}

/// Create/update payload: a name plus the ids of the permissions this role
/// grants. Order and duplicates in `permission_id` are preserved as-is.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct RoleInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permission_id: Vec<u64>,
}
