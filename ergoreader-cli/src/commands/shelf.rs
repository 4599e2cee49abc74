//! Shelf command implementation

use super::{open_store, print_rows};
use anyhow::Result;
use ergoreader_core::Config;

/// List uploaded books
pub async fn shelf(config: &Config, json: bool) -> Result<()> {
    let store = open_store(config).await?;
    let books: Vec<_> = store.books().iter().filter(|b| b.is_user()).collect();
    print_rows(&books, json)
}
