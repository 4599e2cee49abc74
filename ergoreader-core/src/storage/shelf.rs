//! Persisted snapshot of the user's uploaded books

use super::{StorageProvider, StorageResult};
use crate::error::StorageError;
use crate::types::Book;
use std::sync::Arc;

/// Fixed key of the user snapshot
pub const USER_BOOKS_KEY: &str = "ergoreader_user_books.json";

/// Local persistence adapter for user records
///
/// Only `user` records ever reach storage. Loading never fails and saving
/// is best-effort: problems are logged and the caller carries on.
#[derive(Clone)]
pub struct UserShelf {
    storage: Arc<dyn StorageProvider>,
    key: String,
}

impl UserShelf {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self::with_key(storage, USER_BOOKS_KEY)
    }

    /// Bind the shelf to a custom key
    pub fn with_key(storage: Arc<dyn StorageProvider>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Load the snapshot, falling back to an empty shelf
    pub async fn load(&self) -> Vec<Book> {
        match self.try_load().await {
            Ok(books) => books,
            Err(StorageError::NotFound(_)) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to load user books, starting with an empty shelf: {}", e);
                Vec::new()
            }
        }
    }

    /// Load the snapshot, reporting why it could not be read
    pub async fn try_load(&self) -> StorageResult<Vec<Book>> {
        let data = self.storage.read(&self.key).await?;
        let books: Vec<Book> = serde_json::from_slice(&data)
            .map_err(|e| StorageError::CorruptSnapshot(e.to_string()))?;

        let total = books.len();
        let books: Vec<Book> = books.into_iter().filter(Book::is_user).collect();
        if books.len() != total {
            tracing::warn!(
                "Dropped {} non-user records from the stored snapshot",
                total - books.len()
            );
        }
        Ok(books)
    }

    /// Persist the user subsequence of `books`, logging any failure
    pub async fn save(&self, books: &[Book]) {
        if let Err(e) = self.try_save(books).await {
            tracing::warn!("Failed to save user books: {}", e);
        }
    }

    /// Persist the user subsequence of `books`
    pub async fn try_save(&self, books: &[Book]) -> StorageResult<()> {
        let data = encode_snapshot(books)?;
        self.storage.write(&self.key, data).await
    }
}

/// Serialize the user records of `books` as a compact JSON array
pub(crate) fn encode_snapshot(books: &[Book]) -> StorageResult<Vec<u8>> {
    let user_books: Vec<&Book> = books.iter().filter(|b| b.is_user()).collect();
    serde_json::to_vec(&user_books).map_err(|e| StorageError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn shelf() -> (UserShelf, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (UserShelf::new(storage.clone()), storage)
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let (shelf, _) = shelf();
        assert!(shelf.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_is_empty() {
        let (shelf, storage) = shelf();
        storage
            .write(USER_BOOKS_KEY, b"{not json".to_vec())
            .await
            .unwrap();

        assert!(shelf.load().await.is_empty());
        assert!(matches!(
            shelf.try_load().await,
            Err(StorageError::CorruptSnapshot(_))
        ));
    }

    #[tokio::test]
    async fn test_save_only_user_records() {
        let (shelf, storage) = shelf();
        let books = vec![
            Book::remote("r1", "Remote", "A", "Fantasy", "S", "P"),
            Book::user("u1", "Mine", "Uploaded File", "AAAA"),
        ];
        shelf.save(&books).await;

        let raw: serde_json::Value =
            serde_json::from_slice(&storage.read(USER_BOOKS_KEY).await.unwrap()).unwrap();
        let stored = raw.as_array().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["id"], "u1");

        assert_eq!(shelf.load().await, vec![books[1].clone()]);
    }

    #[tokio::test]
    async fn test_load_drops_remote_records() {
        let (shelf, storage) = shelf();
        let mixed = serde_json::to_vec(&vec![
            Book::remote("r1", "Remote", "A", "Fantasy", "S", "P"),
            Book::user("u1", "Mine", "Uploaded File", "AAAA"),
        ])
        .unwrap();
        storage.write(USER_BOOKS_KEY, mixed).await.unwrap();

        let books = shelf.load().await;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "u1");
    }

    #[tokio::test]
    async fn test_save_load_is_fixed_point() {
        let (shelf, storage) = shelf();
        shelf
            .save(&[
                Book::user("u1", "One", "Uploaded File", "AAAA"),
                Book::user("u2", "Two", "Uploaded File", "BBBB"),
            ])
            .await;
        let before = storage.read(USER_BOOKS_KEY).await.unwrap();

        let loaded = shelf.load().await;
        shelf.save(&loaded).await;
        assert_eq!(storage.read(USER_BOOKS_KEY).await.unwrap(), before);
    }
}
