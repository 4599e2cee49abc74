//! Library state store
//!
//! Owns the in-memory collection of remote and user records. Every mutation
//! is applied in memory first and then followed by a save of the user
//! snapshot, so storage never sees a half-applied change.

mod views;

pub use views::{categories, filtered};

use crate::catalog::CatalogClient;
use crate::error::{CatalogError, ErgoError, Result};
use crate::storage::UserShelf;
use crate::types::{Book, Chapter, LoadStatus};
use crate::upload::{self, UploadedFile};
use std::sync::Arc;
use tokio::sync::watch;

/// Message shown when the remote catalog cannot be loaded
pub const CATALOG_ERROR_MESSAGE: &str =
    "Failed to fetch the library. The service may be temporarily unavailable. Please try again later.";

/// Single owner of the library collection
pub struct LibraryStore {
    books: Vec<Book>,
    shelf: UserShelf,
    catalog: Arc<dyn CatalogClient>,
    status: watch::Sender<LoadStatus>,
}

impl LibraryStore {
    /// Create an empty store; call [`LibraryStore::initialize`] to load the shelf
    pub fn new(shelf: UserShelf, catalog: Arc<dyn CatalogClient>) -> Self {
        let (status, _) = watch::channel(LoadStatus::Idle);
        Self {
            books: Vec::new(),
            shelf,
            catalog,
            status,
        }
    }

    /// Replace the collection with the persisted user snapshot
    pub async fn initialize(&mut self) {
        self.books = self.shelf.load().await;
        tracing::info!("Loaded {} user books from the shelf", self.books.len());
    }

    /// Load the remote catalog unless remote records are already present
    ///
    /// On failure the status moves to [`LoadStatus::Error`] and the collection
    /// is left as it was. A client without a credential is rejected before
    /// the status changes.
    pub async fn load_catalog(&mut self) -> Result<()> {
        if self.books.iter().any(Book::is_remote) {
            tracing::debug!("Remote catalog already loaded, skipping fetch");
            self.set_status(LoadStatus::Success);
            return Ok(());
        }
        if !self.catalog.is_configured() {
            return Err(CatalogError::MissingCredential.into());
        }

        let previous = self.set_status(LoadStatus::Loading);
        tracing::info!("Fetching remote catalog");

        match self.catalog.fetch_catalog().await {
            Ok(fetched) => {
                tracing::info!("Fetched {} remote books", fetched.len());
                self.replace_remote(fetched);
                self.persist().await;
                self.set_status(LoadStatus::Success);
                Ok(())
            }
            Err(CatalogError::MissingCredential) => {
                self.set_status(previous);
                Err(CatalogError::MissingCredential.into())
            }
            Err(e) => {
                tracing::warn!("Failed to fetch remote catalog: {}", e);
                self.set_status(LoadStatus::Error(CATALOG_ERROR_MESSAGE.to_string()));
                Err(e.into())
            }
        }
    }

    /// Validate an upload and append it as a user record
    pub async fn upload_document(&mut self, file: UploadedFile) -> Result<Book> {
        upload::validate(&file)?;

        let book = file.into_book();
        tracing::info!("Adding uploaded document '{}' as {}", book.title, book.id);
        self.books.push(book.clone());
        self.persist().await;
        Ok(book)
    }

    /// Return the chapters of a remote book, fetching them on first access
    ///
    /// A failed fetch leaves the record untouched, so a later call retries.
    pub async fn hydrate_chapters(&mut self, id: &str) -> Result<Vec<Chapter>> {
        let book = self
            .get(id)
            .ok_or_else(|| ErgoError::UnknownBook(id.to_string()))?;
        if !book.is_remote() {
            return Err(ErgoError::NotRemote(id.to_string()));
        }
        if let Some(chapters) = book.chapters() {
            tracing::debug!("Chapters for {} already loaded", id);
            return Ok(chapters.to_vec());
        }

        let book = book.clone();
        let chapters = match self.catalog.fetch_chapters(&book).await {
            Ok(chapters) => chapters,
            Err(e) => {
                tracing::warn!("Failed to load content for \"{}\": {}", book.title, e);
                return Err(e.into());
            }
        };

        let hydrated = book.with_chapters(chapters.clone());
        if let Some(slot) = self.books.iter_mut().find(|b| b.id == hydrated.id) {
            *slot = hydrated;
        }
        self.persist().await;
        Ok(chapters)
    }

    /// Category facet of the current collection
    pub fn categories(&self) -> Vec<String> {
        categories(&self.books)
    }

    /// Records matching a search query and category
    pub fn filtered(&self, query: &str, category: &str) -> Vec<&Book> {
        filtered(&self.books, query, category)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn status(&self) -> LoadStatus {
        self.status.borrow().clone()
    }

    /// User-facing message of the last failed catalog load
    pub fn error_message(&self) -> Option<String> {
        self.status.borrow().message().map(str::to_string)
    }

    /// Watch status transitions
    pub fn subscribe_status(&self) -> watch::Receiver<LoadStatus> {
        self.status.subscribe()
    }

    /// Swap in freshly fetched remote records, keeping user records in place
    fn replace_remote(&mut self, fetched: Vec<Book>) {
        self.books.retain(Book::is_user);
        self.books
            .extend(fetched.into_iter().filter(Book::is_remote));
    }

    async fn persist(&self) {
        self.shelf.save(&self.books).await;
    }

    /// Publish a new status, returning the previous one
    fn set_status(&self, status: LoadStatus) -> LoadStatus {
        self.status.send_replace(status)
    }
}
