//! Error types for ErgoReader Core

use thiserror::Error;

/// Result type alias using ErgoError
pub type Result<T> = std::result::Result<T, ErgoError>;

/// Top-level error type for all ErgoReader operations
#[derive(Debug, Error)]
pub enum ErgoError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("No book with id {0}")]
    UnknownBook(String),

    #[error("Book {0} has no remote content to load")]
    NotRemote(String),
}

/// Errors raised by the remote catalog client
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("Remote call failed: {0}")]
    RemoteCall(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl CatalogError {
    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CatalogError::RemoteCall(_) | CatalogError::MalformedResponse(_)
        )
    }
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(String),
}

/// Errors raised while opening or rendering a document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("No PDF data found for this book.")]
    MissingPayload,

    #[error("Failed to decode document: {0}")]
    Decode(String),

    #[error("Failed to render page: {0}")]
    Render(String),

    #[error("Page {page} is out of range (document has {count} pages)")]
    PageOutOfRange { page: u32, count: u32 },
}

/// Upload rejections
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid file type '{0}'. Please upload a PDF file.")]
    UnsupportedType(String),

    #[error("File is too large ({size} bytes). Please upload a PDF under {limit} bytes.")]
    TooLarge { size: u64, limit: u64 },
}
