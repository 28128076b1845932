//! Blob persistence abstraction
//!
//! Paths are plain `/`-separated names. Content is opaque to the platform;
//! screens decide their own encoding.

use alloc::vec::Vec;

use crate::error::StorageError;

/// Key/blob store.
pub trait StorageBackend {
    /// Whole contents stored under `path`.
    fn read(&mut self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Replace the contents stored under `path`.
    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    /// True if something is stored under `path`.
    fn exists(&mut self, path: &str) -> bool;

    /// Delete `path`. Removing a missing path succeeds.
    fn remove(&mut self, path: &str) -> Result<(), StorageError>;
}
