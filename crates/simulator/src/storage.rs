//! Local filesystem storage for the desktop simulator.
//!
//! Paths are resolved relative to the root given at construction. Parent
//! directories are created on write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use platform::{StorageBackend, StorageError};

/// A [`StorageBackend`] backed by `std::fs`.
pub struct SimStorage {
    root: PathBuf,
}

impl SimStorage {
    /// Store blobs under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reject empty, absolute and `..` paths so nothing escapes the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(path);
        if path.is_empty() || !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(StorageError::InvalidPath);
        }
        Ok(self.root.join(rel))
    }
}

fn map_io(e: &std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound,
        _ => StorageError::Backend,
    }
}

impl StorageBackend for SimStorage {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full = self.resolve(path)?;
        fs::read(&full).map_err(|e| map_io(&e))
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                tracing::warn!(error = %e, "create_dir_all failed");
                StorageError::Backend
            })?;
        }
        fs::write(&full, data).map_err(|e| {
            tracing::warn!(path, error = %e, "write failed");
            map_io(&e)
        })
    }

    fn exists(&mut self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }

    fn remove(&mut self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        match fs::remove_file(&full) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(&e)),
        }
    }
}
