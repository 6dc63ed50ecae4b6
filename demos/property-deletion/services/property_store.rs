use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::models::{
    error::StoreError,
    property::{ImageSwap, Property, PropertyId, PropertyStatus, StatusChange},
};

/// In-memory stand-in for the hosted properties table.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    properties: Arc<RwLock<HashMap<PropertyId, Property>>>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, property: Property) {
        self.properties
            .write()
            .expect("properties lock")
            .insert(property.id, property);
    }

    pub fn get(&self, id: PropertyId) -> Result<Property, StoreError> {
        self.properties
            .read()
            .expect("properties lock")
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn mark_inactive(&self, id: PropertyId) -> Result<StatusChange, StoreError> {
        log::debug!("mark_inactive {id}");
        let mut properties = self.properties.write().expect("properties lock");
        let property = properties.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let previous_status = property.status;
        property.status = PropertyStatus::Inactive;
        property.touch();
        Ok(StatusChange {
            property_id: id,
            previous_status,
        })
    }

    pub async fn restore_status(&self, change: StatusChange) -> Result<(), StoreError> {
        log::debug!("restore_status {}", change.property_id);
        let mut properties = self.properties.write().expect("properties lock");
        let property = properties
            .get_mut(&change.property_id)
            .ok_or(StoreError::NotFound(change.property_id))?;
        property.status = change.previous_status;
        property.touch();
        Ok(())
    }

    /// Removes the row and returns it so it can be put back.
    pub async fn remove(&self, id: PropertyId) -> Result<Property, StoreError> {
        log::debug!("remove {id}");
        self.properties
            .write()
            .expect("properties lock")
            .remove(&id)
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn reinsert(&self, snapshot: Property) -> Result<(), StoreError> {
        log::debug!("reinsert {}", snapshot.id);
        self.insert(snapshot);
        Ok(())
    }

    /// Points the property at a new image if nobody updated it since
    /// `expected_version` was read.
    pub async fn swap_image(
        &self,
        id: PropertyId,
        expected_version: u32,
        new_path: String,
    ) -> Result<ImageSwap, StoreError> {
        let mut properties = self.properties.write().expect("properties lock");
        let property = properties.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if property.version != expected_version {
            return Err(StoreError::VersionConflict {
                id,
                expected: expected_version,
                actual: property.version,
            });
        }
        let previous_path = property.image_path.replace(new_path);
        property.touch();
        Ok(ImageSwap {
            property_id: id,
            previous_path,
        })
    }

    pub async fn restore_image(&self, swap: ImageSwap) -> Result<(), StoreError> {
        let mut properties = self.properties.write().expect("properties lock");
        let property = properties
            .get_mut(&swap.property_id)
            .ok_or(StoreError::NotFound(swap.property_id))?;
        property.image_path = swap.previous_path;
        property.touch();
        Ok(())
    }
}
