use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PropertyId = Uuid;
pub type OwnerId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone)]
pub struct Property {
    pub id: PropertyId,
    pub owner_id: OwnerId,
    pub name: String,
    pub status: PropertyStatus,
    pub image_path: Option<String>,
    pub version: u32,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn new(owner_id: OwnerId, name: impl Into<String>) -> Self {
        Self {
            id: PropertyId::new_v4(),
            owner_id,
            name: name.into(),
            status: PropertyStatus::Active,
            image_path: None,
            version: 1,
            updated_at: Utc::now(),
        }
    }

    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub(crate) fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }
}

/// Status a property had before it was deactivated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub property_id: PropertyId,
    pub previous_status: PropertyStatus,
}

#[derive(Debug, Clone)]
pub struct ImageSwap {
    pub property_id: PropertyId,
    pub previous_path: Option<String>,
}
