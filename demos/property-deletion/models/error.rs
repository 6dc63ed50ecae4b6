use saga_executor::DefinitionError;
use thiserror::Error;

use super::property::PropertyId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("property {0} not found")]
    NotFound(PropertyId),
    #[error("property {id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        id: PropertyId,
        expected: u32,
        actual: u32,
    },
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct StorageError(pub String);

/// Error every property saga step converts into.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("property store: {0}")]
    Store(#[from] StoreError),
    #[error("file storage: {0}")]
    Storage(#[from] StorageError),
    #[error("invalid saga: {0}")]
    Definition(#[from] DefinitionError),
}
