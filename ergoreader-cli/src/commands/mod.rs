//! CLI command implementations

mod browse;
mod catalog;
mod read;
mod shelf;
mod upload;
mod view;

pub use browse::browse;
pub use catalog::catalog;
pub use read::read;
pub use shelf::shelf;
pub use upload::upload;
pub use view::view;

use anyhow::{bail, Context, Result};
use ergoreader_core::catalog::GeminiClient;
use ergoreader_core::storage::{LocalStorage, UserShelf};
use ergoreader_core::{Book, CatalogError, Config, ErgoError, LibraryStore};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Open the library store and load the local shelf
pub(crate) async fn open_store(config: &Config) -> Result<LibraryStore> {
    let storage = Arc::new(LocalStorage::new(&config.storage_path));
    let catalog = GeminiClient::new(config).context("Failed to set up the catalog client")?;

    let mut store = LibraryStore::new(UserShelf::new(storage), Arc::new(catalog));
    store.initialize().await;
    Ok(store)
}

/// Load the remote catalog behind a spinner
pub(crate) async fn load_catalog(store: &mut LibraryStore) -> Result<()> {
    let pb = spinner("Loading library...")?;
    let result = store.load_catalog().await;
    pb.finish_and_clear();

    match result {
        Ok(()) => Ok(()),
        Err(ErgoError::Catalog(CatalogError::MissingCredential)) => {
            bail!("API key not configured. Set ERGOREADER_API_KEY or pass --api-key.")
        }
        Err(e) => {
            let message = store
                .error_message()
                .unwrap_or_else(|| "An unknown error occurred.".to_string());
            Err(e).context(message)
        }
    }
}

pub(crate) fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Book row for list output
#[derive(Serialize)]
pub(crate) struct BookRow {
    id: String,
    title: String,
    author: String,
    source: ergoreader_core::BookSource,
    category: Option<String>,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            source: book.source(),
            category: book.category().map(str::to_string),
        }
    }
}

pub(crate) fn print_rows(books: &[&Book], json: bool) -> Result<()> {
    if json {
        let rows: Vec<BookRow> = books.iter().copied().map(BookRow::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("No Books Found");
        return Ok(());
    }
    for (index, book) in books.iter().enumerate() {
        println!(
            "{:>3}. {} by {} [{}] ({})",
            index + 1,
            book.title,
            book.author,
            book.category().unwrap_or("-"),
            book.id
        );
    }
    Ok(())
}

/// Print a remote book with its chapters
pub(crate) fn print_book(book: &Book) {
    println!("{}", book.category().unwrap_or_default().to_uppercase());
    println!("{}", book.title);
    println!("by {}", book.author);
    if let Some(summary) = book.summary() {
        println!("\nSummary\n{}", summary);
    }
    for chapter in book.chapters().unwrap_or_default() {
        println!("\n{}\n", chapter.title);
        for paragraph in chapter.paragraphs() {
            println!("{}\n", paragraph);
        }
    }
}
