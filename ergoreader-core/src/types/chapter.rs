//! Chapter type holding generated chapter text

use serde::{Deserialize, Serialize};

/// A single chapter of a remote book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
    /// Chapter title
    pub title: String,

    /// Chapter text, paragraphs separated by newlines
    pub content: String,
}

impl Chapter {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Non-blank paragraphs of the chapter
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}
