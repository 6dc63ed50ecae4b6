use env_logger::Env;
use models::{
    error::PropertyError,
    property::{OwnerId, Property},
};
use services::{file_storage::FileStorage, property_store::PropertyStore};
use tokio::spawn;

use crate::definitions::{delete_property::delete_property, replace_image::replace_image};

mod definitions;
mod models;
mod services;

// mark property inactive - local table
// move images to trash - storage service
// delete property row - local table
#[tokio::main]
async fn main() -> Result<(), PropertyError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let store = PropertyStore::new();
    let storage = FileStorage::new();
    let owner_id = OwnerId::new_v4();

    let mut handles = Vec::new();
    for number in 0..10 {
        let path = format!("{owner_id}/property-{number}.jpg");
        storage.upload(path.clone(), vec![number; 16]).await?;
        let property = Property::new(owner_id, format!("Property {number}")).with_image(path.clone());
        let property_id = property.id;
        store.insert(property);

        // roughly half of the deletions hit a full disk and roll back
        let storage = if rand::random() {
            storage.failing("disk full")
        } else {
            storage.clone()
        };
        let definition = delete_property(store.clone(), storage, property_id, vec![path]);
        handles.push(spawn(async move {
            let result = definition.run().await?;
            println!(
                "delete {property_id}: success={} completed={:?} compensated={:?}",
                result.success, result.completed_steps, result.compensated_steps
            );
            result.into_result()
        }));
    }

    for handle in handles {
        if let Ok(Err(e)) = handle.await {
            println!("deletion failed: {e}");
        }
    }

    let property = Property::new(owner_id, "Harbour view").with_image(format!("{owner_id}/old.jpg"));
    storage
        .upload(format!("{owner_id}/old.jpg"), vec![0; 16])
        .await?;
    store.insert(property.clone());

    let result = replace_image(
        store.clone(),
        storage.clone(),
        &property,
        format!("{owner_id}/new.jpg"),
        vec![1; 16],
    )
    .run()
    .await?;
    let updated = store.get(property.id)?;
    println!(
        "replace image for {} owned by {}: success={} image={:?} version={}",
        updated.name, updated.owner_id, result.success, updated.image_path, updated.version
    );

    // a second replacement with the stale version conflicts and removes its upload
    let stale = replace_image(
        store.clone(),
        storage.clone(),
        &property,
        format!("{owner_id}/stale.jpg"),
        vec![2; 16],
    )
    .run()
    .await?;
    println!(
        "stale replace: success={} compensated={:?} upload kept={}",
        stale.success,
        stale.compensated_steps,
        storage.contains(&format!("{owner_id}/stale.jpg"))
    );
    if let Err(e) = stale.into_result() {
        println!("stale replace failed: {e}");
    }

    Ok(())
}
