//! Key-value blob persistence used by the progress store.

use crate::error::StorageError;
use std::collections::HashMap;

/// Key holding the serialized progress map.
pub const PROGRESS_KEY: &str = "auraLearnProgress";

/// Key receiving an unreadable progress blob when recovery is requested.
///
/// Later recoveries use `auraLearnProgress.corrupt.2`, `.3`, and so on, so an
/// earlier backup is never overwritten.
pub const CORRUPT_BACKUP_KEY: &str = "auraLearnProgress.corrupt";

/// First backup key that holds no value yet.
pub fn free_backup_key<B: BlobStore + ?Sized>(blob: &B) -> Result<String, StorageError> {
    if blob.get(CORRUPT_BACKUP_KEY)?.is_none() {
        return Ok(CORRUPT_BACKUP_KEY.to_string());
    }
    let mut n = 2u64;
    loop {
        let key = format!("{CORRUPT_BACKUP_KEY}.{n}");
        if blob.get(&key)?.is_none() {
            return Ok(key);
        }
        n += 1;
    }
}

/// String-valued key-value storage.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory blob store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    values: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a single value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<B: BlobStore + ?Sized> BlobStore for &mut B {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
