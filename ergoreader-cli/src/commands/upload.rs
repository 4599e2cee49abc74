//! Upload command implementation

use super::open_store;
use anyhow::{Context, Result};
use ergoreader_core::upload::MAX_UPLOAD_BYTES;
use ergoreader_core::{Config, UploadedFile, ValidationError};
use std::path::Path;

/// Validate a file and add it to the shelf
pub async fn upload(config: &Config, input: &Path) -> Result<()> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .context("Could not determine file name")?
        .to_string();
    let mime_type = mime_guess::from_path(input)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let size = tokio::fs::metadata(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?
        .len();
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        })
        .with_context(|| format!("Rejected {}", input.display()));
    }

    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let mut store = open_store(config).await?;
    let book = store
        .upload_document(UploadedFile::new(name, mime_type, bytes))
        .await
        .with_context(|| format!("Could not add {}", input.display()))?;

    println!("Added '{}' ({})", book.title, book.id);
    Ok(())
}
