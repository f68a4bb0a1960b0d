use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Read-side shape of a user. `roles` is materialized from the role store at
/// read time; each role in turn embeds its current permissions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub password: String,
    pub roles: Vec<Role>,
}

/// Create/update payload. Credentials are carried verbatim; this service
/// manages RBAC data and does not hash or verify anything.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UserInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role_id: Vec<u64>,
}
