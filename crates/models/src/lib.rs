//! Entity records and request payloads shared by the store and HTTP layers.
//! - Read-side shapes embed their referenced entities in full.
//! - Input shapes carry referenced entities as plain id sequences.

pub mod permission;
pub mod role;
pub mod user;

pub use permission::{Permission, PermissionInput};
pub use role::{Role, RoleInput};
pub use user::{User, UserInput};
