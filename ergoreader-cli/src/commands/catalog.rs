//! Catalog command implementation

use super::{load_catalog, open_store, print_rows};
use anyhow::Result;
use ergoreader_core::Config;

/// List catalog and uploaded books matching a query and category
pub async fn catalog(config: &Config, search: &str, category: &str, json: bool) -> Result<()> {
    let mut store = open_store(config).await?;
    load_catalog(&mut store).await?;

    let books = store.filtered(search, category);
    tracing::info!("{} of {} books match", books.len(), store.books().len());

    if !json {
        println!("Categories: {}", store.categories().join(" | "));
        println!();
    }
    print_rows(&books, json)
}
