//! Core types for the ErgoReader library collection

mod book;
mod chapter;
mod status;

pub use book::{Book, BookContent, BookSource};
pub use chapter::Chapter;
pub use status::LoadStatus;

/// Facet value that matches every record
pub const ALL_CATEGORIES: &str = "All";

/// Category reported by every user-uploaded record
pub const PDF_CATEGORY: &str = "PDF";

/// Author shown for user-uploaded records
pub const UPLOADED_AUTHOR: &str = "Uploaded File";
