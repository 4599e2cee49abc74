//! The Book record - one entry in the library collection

use super::{Chapter, PDF_CATEGORY};
use serde::{Deserialize, Serialize};

/// Where a record came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookSource {
    /// Generated by the remote catalog
    #[serde(alias = "gemini")]
    Remote,

    /// Uploaded by the user and stored locally
    User,
}

/// Source-specific payload of a book
///
/// Serialized inline with the book under a `source` tag, so a record is
/// either a remote entry with catalog metadata or a user entry with a
/// document payload, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum BookContent {
    #[serde(alias = "gemini")]
    Remote {
        category: String,
        summary: String,
        #[serde(rename = "coverPrompt", alias = "coverImagePrompt")]
        cover_prompt: String,
        /// Absent until hydrated
        #[serde(default, skip_serializing_if = "Option::is_none")]
        chapters: Option<Vec<Chapter>>,
    },

    User {
        /// Standard base64 of the uploaded PDF bytes
        #[serde(rename = "documentData", alias = "pdfData")]
        document_data: String,
    },
}

/// A single catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Opaque unique identifier
    pub id: String,

    pub title: String,

    pub author: String,

    #[serde(flatten)]
    pub content: BookContent,
}

impl Book {
    /// Create a remote record without chapters
    pub fn remote(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        summary: impl Into<String>,
        cover_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            content: BookContent::Remote {
                category: category.into(),
                summary: summary.into(),
                cover_prompt: cover_prompt.into(),
                chapters: None,
            },
        }
    }

    /// Create a user record backed by an encoded document
    pub fn user(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        document_data: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            content: BookContent::User {
                document_data: document_data.into(),
            },
        }
    }

    pub fn source(&self) -> BookSource {
        match self.content {
            BookContent::Remote { .. } => BookSource::Remote,
            BookContent::User { .. } => BookSource::User,
        }
    }

    pub fn is_user(&self) -> bool {
        self.source() == BookSource::User
    }

    pub fn is_remote(&self) -> bool {
        self.source() == BookSource::Remote
    }

    /// Category used for faceting; user records always report "PDF"
    pub fn category(&self) -> Option<&str> {
        match &self.content {
            BookContent::Remote { category, .. } => Some(category.as_str()),
            BookContent::User { .. } => Some(PDF_CATEGORY),
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match &self.content {
            BookContent::Remote { summary, .. } => Some(summary.as_str()),
            BookContent::User { .. } => None,
        }
    }

    pub fn cover_prompt(&self) -> Option<&str> {
        match &self.content {
            BookContent::Remote { cover_prompt, .. } => Some(cover_prompt.as_str()),
            BookContent::User { .. } => None,
        }
    }

    /// Hydrated chapters, if any
    pub fn chapters(&self) -> Option<&[Chapter]> {
        match &self.content {
            BookContent::Remote {
                chapters: Some(chapters),
                ..
            } if !chapters.is_empty() => Some(chapters.as_slice()),
            _ => None,
        }
    }

    pub fn document_data(&self) -> Option<&str> {
        match &self.content {
            BookContent::User { document_data } => Some(document_data.as_str()),
            BookContent::Remote { .. } => None,
        }
    }

    /// Copy of this record carrying the given chapters
    ///
    /// User records are returned unchanged.
    pub fn with_chapters(&self, chapters: Vec<Chapter>) -> Self {
        let mut book = self.clone();
        if let BookContent::Remote { chapters: slot, .. } = &mut book.content {
            *slot = Some(chapters);
        }
        book
    }

    /// Case-insensitive substring match on title or author
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.author.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_serialization() {
        let book = Book::remote("b1", "Dune Dreams", "A. Writer", "Science Fiction", "Sand.", "Dunes at dusk");
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["source"], "remote");
        assert_eq!(json["coverPrompt"], "Dunes at dusk");
        assert!(json.get("chapters").is_none());
        assert!(json.get("documentData").is_none());

        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }

    #[test]
    fn test_user_serialization() {
        let book = Book::user("user-1", "notes", "Uploaded File", "JVBERi0=");
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["source"], "user");
        assert_eq!(json["documentData"], "JVBERi0=");
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn test_legacy_field_names() {
        let json = r#"{"id":"user-17","title":"report","author":"Uploaded File","source":"user","pdfData":"AAAA","category":"PDF"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert!(book.is_user());
        assert_eq!(book.document_data(), Some("AAAA"));

        let json = r#"{"id":"9","title":"T","author":"A","source":"gemini","coverImagePrompt":"c","category":"Mystery","summary":"s"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert!(book.is_remote());
        assert_eq!(book.cover_prompt(), Some("c"));
    }

    #[test]
    fn test_user_category_is_pdf() {
        let book = Book::user("user-1", "notes", "Uploaded File", "");
        assert_eq!(book.category(), Some(PDF_CATEGORY));
        assert_eq!(book.summary(), None);
    }

    #[test]
    fn test_with_chapters() {
        let book = Book::remote("b1", "T", "A", "C", "S", "P");
        assert!(book.chapters().is_none());

        let hydrated = book.with_chapters(vec![Chapter::new("One", "Text")]);
        assert_eq!(hydrated.chapters().map(|c| c.len()), Some(1));
        assert!(book.chapters().is_none());

        let user = Book::user("u", "T", "A", "data");
        assert_eq!(user.with_chapters(vec![Chapter::new("One", "Text")]), user);
    }

    #[test]
    fn test_matches_query() {
        let book = Book::remote("b1", "The Silent Orchard", "Mara Quill", "C", "S", "P");
        assert!(book.matches_query(""));
        assert!(book.matches_query("orchard"));
        assert!(book.matches_query("QUILL"));
        assert!(!book.matches_query("river"));
    }
}
