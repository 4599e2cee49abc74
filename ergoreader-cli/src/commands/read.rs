//! Read command implementation

use super::{load_catalog, open_store, print_book, spinner};
use anyhow::{bail, Context, Result};
use ergoreader_core::types::ALL_CATEGORIES;
use ergoreader_core::Config;

/// Load a matching remote book's chapters and print them
pub async fn read(config: &Config, query: &str) -> Result<()> {
    let mut store = open_store(config).await?;
    load_catalog(&mut store).await?;

    let Some(id) = store
        .filtered(query, ALL_CATEGORIES)
        .into_iter()
        .find(|b| b.is_remote())
        .map(|b| b.id.clone())
    else {
        bail!("No catalog book matches '{}'", query);
    };

    let pb = spinner("Loading book content...")?;
    let result = store.hydrate_chapters(&id).await;
    pb.finish_and_clear();
    result.with_context(|| {
        format!("Failed to load content for '{}'. Please check your connection and try again.", query)
    })?;

    if let Some(book) = store.get(&id) {
        print_book(book);
    }
    Ok(())
}
