use uuid::Uuid;

/// Identifies one saga run in log lines and results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SagaScope {
    pub id: Uuid,
    pub name: String,
}

impl SagaScope {
    pub fn named(name: impl Into<String>) -> Self {
        Self::from_id(Uuid::new_v4(), name)
    }

    pub fn from_id(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
