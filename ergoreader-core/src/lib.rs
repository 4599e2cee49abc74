//! ErgoReader Core Library
//!
//! This crate provides the library state and reading logic for ErgoReader.
//! Books come from two sources: a remote generative catalog and PDF documents
//! uploaded by the user. Only the uploaded records are persisted locally.

pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod pager;
pub mod storage;
pub mod types;
pub mod upload;

pub use config::Config;
pub use error::{CatalogError, DocumentError, ErgoError, Result, StorageError, ValidationError};
pub use library::LibraryStore;
pub use pager::{NavKey, PageController, PagerState};
pub use types::{Book, BookContent, BookSource, Chapter, LoadStatus};
pub use upload::UploadedFile;
