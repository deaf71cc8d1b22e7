//! The local key-value area the store snapshot is written to.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::error::AppError;

/// Key the whole fleet snapshot is stored under.
pub const STORAGE_KEY: &str = "vehicle-management-storage";

pub trait BlobStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, AppError>;
    fn save(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// One `<key>.json` file per key inside a data directory.
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::Persistence(format!(
                "failed to read {}: {err}",
                path.display()
            ))),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|err| {
            AppError::Persistence(format!("failed to create {}: {err}", self.dir.display()))
        })?;

        // The snapshot is swapped in by rename, never written in place.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|err| {
            AppError::Persistence(format!("failed to write {}: {err}", tmp.display()))
        })?;
        fs::rename(&tmp, &path).map_err(|err| {
            AppError::Persistence(format!("failed to replace {}: {err}", path.display()))
        })
    }
}

#[derive(Default)]
pub struct MemoryBlobStore {
    entries: DashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
