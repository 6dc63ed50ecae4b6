use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::models::error::StorageError;

/// In-memory bucket with a trash area. A clone can be told to fail every
/// write, which is how the demo simulates an unavailable storage service.
#[derive(Debug, Clone, Default)]
pub struct FileStorage {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    trash: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    failure: Option<String>,
}

/// A file moved out of the bucket that can still be put back.
#[derive(Debug, Clone)]
pub struct TrashedFile {
    pub path: String,
}

impl FileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same bucket, but every write fails with `message`.
    pub fn failing(&self, message: impl Into<String>) -> Self {
        Self {
            files: self.files.clone(),
            trash: self.trash.clone(),
            failure: Some(message.into()),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.read().expect("files lock").contains_key(path)
    }

    fn check(&self) -> Result<(), StorageError> {
        match &self.failure {
            Some(message) => Err(StorageError(message.clone())),
            None => Ok(()),
        }
    }

    pub async fn upload(&self, path: String, bytes: Vec<u8>) -> Result<String, StorageError> {
        self.check()?;
        log::debug!("upload {path}");
        self.files
            .write()
            .expect("files lock")
            .insert(path.clone(), bytes);
        Ok(path)
    }

    pub async fn remove(&self, path: String) -> Result<(), StorageError> {
        log::debug!("remove {path}");
        self.files.write().expect("files lock").remove(&path);
        Ok(())
    }

    pub async fn move_to_trash(&self, paths: Vec<String>) -> Result<Vec<TrashedFile>, StorageError> {
        self.check()?;
        let mut files = self.files.write().expect("files lock");
        let mut trash = self.trash.write().expect("trash lock");
        if let Some(missing) = paths.iter().find(|path| !files.contains_key(*path)) {
            return Err(StorageError(format!("{missing} does not exist")));
        }
        let mut trashed = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(bytes) = files.remove(&path) {
                trash.insert(path.clone(), bytes);
                trashed.push(TrashedFile { path });
            }
        }
        Ok(trashed)
    }

    pub async fn restore_from_trash(&self, trashed: Vec<TrashedFile>) -> Result<(), StorageError> {
        let mut files = self.files.write().expect("files lock");
        let mut trash = self.trash.write().expect("trash lock");
        for file in trashed {
            let bytes = trash
                .remove(&file.path)
                .ok_or_else(|| StorageError(format!("{} is not in trash", file.path)))?;
            files.insert(file.path, bytes);
        }
        Ok(())
    }

    /// Deletes a file for good.
    pub async fn purge(&self, path: String) -> Result<(), StorageError> {
        self.check()?;
        log::debug!("purge {path}");
        self.files.write().expect("files lock").remove(&path);
        self.trash.write().expect("trash lock").remove(&path);
        Ok(())
    }
}
