use serde::{Deserialize, Serialize};

/// A named URL a role may grant access to. Leaf entity: references nothing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Permission {
    pub id: u64,
    pub name: String,
    pub url: String,
}

/// Create/update payload. The id is always assigned by the store; any
/// client-supplied id field is ignored during deserialization.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PermissionInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}
