//! Upload validation and conversion into user records

use crate::error::{DocumentError, ValidationError};
use crate::types::{Book, UPLOADED_AUTHOR};
use base64::{engine::general_purpose::STANDARD, Engine};

/// The only accepted upload type
pub const PDF_MIME: &str = "application/pdf";

/// Largest accepted upload (10 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A file handed over by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original file name, including extension
    pub name: String,

    /// Declared MIME type
    pub mime_type: String,

    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Display title derived from the file name
    pub fn title(&self) -> String {
        let name = self.name.as_str();
        let stripped = name
            .len()
            .checked_sub(4)
            .filter(|&cut| name.is_char_boundary(cut))
            .filter(|&cut| name[cut..].eq_ignore_ascii_case(".pdf"))
            .map(|cut| &name[..cut]);
        stripped.unwrap_or(name).to_string()
    }

    /// Build the user record for this file
    pub fn into_book(self) -> Book {
        let id = format!("user-{}", chrono::Utc::now().timestamp_millis());
        let title = self.title();
        Book::user(id, title, UPLOADED_AUTHOR, encode_document(&self.bytes))
    }
}

/// Check type and size before the file reaches the library
pub fn validate(file: &UploadedFile) -> Result<(), ValidationError> {
    if file.mime_type != PDF_MIME {
        return Err(ValidationError::UnsupportedType(file.mime_type.clone()));
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size: file.size(),
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Encode document bytes for storage in a user record
pub fn encode_document(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a stored document payload back to raw bytes
pub fn decode_document(data: &str) -> Result<Vec<u8>, DocumentError> {
    STANDARD
        .decode(data.trim())
        .map_err(|e| DocumentError::Decode(e.to_string()))
}
