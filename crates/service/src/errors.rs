use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The requested id is absent from the target store.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    /// A referenced id inside a write payload does not resolve; the whole
    /// write is rejected.
    #[error("referenced {entity} {id} does not exist")]
    InvalidReference { entity: &'static str, id: u64 },
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn invalid_reference(entity: &'static str, id: u64) -> Self {
        Self::InvalidReference { entity, id }
    }
}
