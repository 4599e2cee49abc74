//! Remote catalog boundary
//!
//! The library store only sees [`CatalogClient`]; the Gemini implementation
//! lives in [`gemini`] and can be swapped for a mock in tests.

mod gemini;

pub use gemini::{parse_catalog, parse_chapters, GeminiClient};

use crate::error::CatalogError;
use crate::types::{Book, Chapter};
use async_trait::async_trait;

/// Result type for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Source of remote book records and their chapter text
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Whether the client holds the credential it needs to make calls
    fn is_configured(&self) -> bool {
        true
    }

    /// Fetch a fresh list of remote book records
    async fn fetch_catalog(&self) -> CatalogResult<Vec<Book>>;

    /// Fetch the chapters of one remote book
    async fn fetch_chapters(&self, book: &Book) -> CatalogResult<Vec<Chapter>>;
}
