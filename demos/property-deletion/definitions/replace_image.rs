use saga_executor::{compensate_with, execute_with, LogFacade, SagaDefinition, SagaScope, Step};

use crate::{
    models::{error::PropertyError, property::Property},
    services::{file_storage::FileStorage, property_store::PropertyStore},
};

/// Uploads a new image, points the property at it and drops the old file.
///
/// The swap is checked against the version of `property` the caller read, so
/// a concurrent update rolls the upload back.
pub fn replace_image(
    store: PropertyStore,
    storage: FileStorage,
    property: &Property,
    new_path: String,
    bytes: Vec<u8>,
) -> SagaDefinition<PropertyError, LogFacade> {
    let property_id = property.id;
    let expected_version = property.version;
    let upload_path = new_path.clone();

    let definition = SagaDefinition::new(
        SagaScope::from_id(property_id, "replace_image"),
        LogFacade::new("property"),
    )
    .add_step(
        "upload_image",
        execute_with!(FileStorage::upload, storage.clone(), upload_path, bytes),
        compensate_with!(FileStorage::remove, storage.clone()),
    )
    .add_step(
        "swap_image",
        execute_with!(
            PropertyStore::swap_image,
            store.clone(),
            property_id,
            expected_version,
            new_path
        ),
        compensate_with!(PropertyStore::restore_image, store),
    );

    match property.image_path.clone() {
        Some(old_path) => definition.step(Step::irreversible(
            "discard_old_image",
            execute_with!(FileStorage::purge, storage, old_path),
        )),
        None => definition,
    }
}
