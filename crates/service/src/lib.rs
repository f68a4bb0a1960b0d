//! RBAC data core: per-entity in-memory stores with write-time reference
//! resolution and read-time materialization of embedded references.
//! - One lock per store guards its collection and its id allocator.
//! - Cross-store references are held as ids and joined on read, so views
//!   always reflect the referenced entity's current values.

pub mod errors;
pub mod store;
