use async_trait::async_trait;
use saga_executor::{compensate_with, execute_with, LogFacade, SagaDefinition, SagaScope, SagaStep};

use crate::{
    models::{
        error::{PropertyError, StorageError},
        property::PropertyId,
    },
    services::{
        file_storage::{FileStorage, TrashedFile},
        property_store::PropertyStore,
    },
};

/// Moves the property's images to trash so they can be restored.
pub struct ArchiveImages {
    pub storage: FileStorage,
    pub paths: Vec<String>,
}

#[async_trait]
impl SagaStep for ArchiveImages {
    type Output = Vec<TrashedFile>;
    type Error = StorageError;

    fn name(&self) -> &str {
        "archive_images"
    }

    async fn execute(&self) -> Result<Vec<TrashedFile>, StorageError> {
        self.storage.move_to_trash(self.paths.clone()).await
    }

    async fn compensate(&self, trashed: Vec<TrashedFile>) -> Result<(), StorageError> {
        self.storage.restore_from_trash(trashed).await
    }
}

// deactivate first so readers stop seeing the property while files move
pub fn delete_property(
    store: PropertyStore,
    storage: FileStorage,
    property_id: PropertyId,
    image_paths: Vec<String>,
) -> SagaDefinition<PropertyError, LogFacade> {
    SagaDefinition::new(
        SagaScope::from_id(property_id, "delete_property"),
        LogFacade::new("property"),
    )
    .add_step(
        "mark_inactive",
        execute_with!(PropertyStore::mark_inactive, store.clone(), property_id),
        compensate_with!(PropertyStore::restore_status, store.clone()),
    )
    .then(ArchiveImages {
        storage,
        paths: image_paths,
    })
    .add_step(
        "delete_record",
        execute_with!(PropertyStore::remove, store.clone(), property_id),
        compensate_with!(PropertyStore::reinsert, store),
    )
}
