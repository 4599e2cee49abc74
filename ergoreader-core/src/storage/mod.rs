//! Key/value storage boundary and the user shelf built on top of it

mod shelf;

pub use shelf::{UserShelf, USER_BOOKS_KEY};

use crate::error::StorageError;
use async_trait::async_trait;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Durable key/value store
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Read the value stored under a key
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Replace the value stored under a key
    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Remove a key
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Local filesystem storage provider, one file per key
pub struct LocalStorage {
    root: std::path::PathBuf,
}

impl LocalStorage {
    /// Create a new local storage provider with the given root directory
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a key to a path under the root, rejecting traversal
    fn full_path(&self, key: &str) -> StorageResult<std::path::PathBuf> {
        use std::path::Component;

        let mut normalized = std::path::PathBuf::new();
        for component in std::path::Path::new(key).components() {
            match component {
                Component::Normal(c) => normalized.push(c),
                Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                    return Err(StorageError::PermissionDenied(format!(
                        "key escapes storage root: {}",
                        key
                    )));
                }
            }
        }

        if normalized.as_os_str().is_empty() {
            return Err(StorageError::BackendError("empty storage key".to_string()));
        }

        Ok(self.root.join(normalized))
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(key)?;
        tokio::fs::read(full_path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(key.to_string()),
            _ => StorageError::BackendError(e.to_string()),
        })
    }

    /// Writes to a temp file then renames so readers never see a partial value
    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        let full_path = self.full_path(key)?;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::BackendError(e.to_string()))?;
        }

        let mut temp_name = full_path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = std::path::PathBuf::from(temp_name);

        tokio::fs::write(&temp_path, data)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        tokio::fs::rename(&temp_path, &full_path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let full_path = self.full_path(key)?;
        tokio::fs::remove_file(full_path)
            .await
            .map_err(|_| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let full_path = self.full_path(key)?;
        tokio::fs::try_exists(full_path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }
}

/// In-memory storage provider (for testing)
#[derive(Default)]
pub struct MemoryStorage {
    data: std::sync::RwLock<std::collections::HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StorageError {
        StorageError::BackendError("memory storage lock poisoned".to_string())
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.data
            .read()
            .map_err(|_| Self::poisoned())?
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        self.data
            .write()
            .map_err(|_| Self::poisoned())?
            .insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.data
            .write()
            .map_err(|_| Self::poisoned())?
            .remove(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self
            .data
            .read()
            .map_err(|_| Self::poisoned())?
            .contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();

        storage.write("test.json", b"[]".to_vec()).await.unwrap();
        assert_eq!(storage.read("test.json").await.unwrap(), b"[]");
        assert!(storage.exists("test.json").await.unwrap());
        assert!(!storage.exists("missing.json").await.unwrap());

        storage.delete("test.json").await.unwrap();
        assert!(matches!(
            storage.read("test.json").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));

        storage.write("shelf.json", b"[1]".to_vec()).await.unwrap();
        storage.write("shelf.json", b"[2]".to_vec()).await.unwrap();
        assert_eq!(storage.read("shelf.json").await.unwrap(), b"[2]");
        assert!(!dir.path().join("nested/shelf.json.tmp").exists());

        storage.delete("shelf.json").await.unwrap();
        assert!(!storage.exists("shelf.json").await.unwrap());
        assert!(matches!(
            storage.read("shelf.json").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage_rejects_traversal() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.write("../escape.json", Vec::new()).await.unwrap_err();
        assert!(matches!(err, StorageError::PermissionDenied(_)));
        assert!(storage.read("/etc/passwd").await.is_err());
    }
}
