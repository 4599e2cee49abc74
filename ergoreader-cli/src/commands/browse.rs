//! Interactive browse session
//!
//! Keeps one library store alive so remote books hydrated during the
//! session are served from memory on the next visit.

use super::{load_catalog, open_store, print_book, print_rows, spinner};
use anyhow::Result;
use ergoreader_core::types::ALL_CATEGORIES;
use ergoreader_core::Config;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands: search <text> | category <name> | categories | open <number> | reset | help | quit";

/// Run the interactive browser
pub async fn browse(config: &Config) -> Result<()> {
    let mut store = open_store(config).await?;
    load_catalog(&mut store).await?;

    let mut query = String::new();
    let mut category = ALL_CATEGORIES.to_string();

    println!("{}", HELP);
    print_rows(&store.filtered(&query, &category), false)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
        let argument = argument.trim();

        match command {
            "quit" | "q" => break,
            "help" => println!("{}", HELP),
            "categories" => println!("{}", store.categories().join(" | ")),
            "search" => {
                query = argument.to_string();
                print_rows(&store.filtered(&query, &category), false)?;
            }
            "category" => {
                if store.categories().iter().any(|c| c == argument) {
                    category = argument.to_string();
                    print_rows(&store.filtered(&query, &category), false)?;
                } else {
                    println!("Unknown category '{}'", argument);
                }
            }
            "reset" => {
                query.clear();
                category = ALL_CATEGORIES.to_string();
                print_rows(&store.filtered(&query, &category), false)?;
            }
            "open" => {
                let selected = argument
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| store.filtered(&query, &category).get(i).map(|b| (*b).clone()));
                let Some(book) = selected else {
                    println!("No book with that number");
                    continue;
                };
                if book.is_user() {
                    println!("'{}' is an uploaded PDF; run `ergoreader view {}`", book.title, book.id);
                    continue;
                }

                let pb = spinner("Loading book content...")?;
                let result = store.hydrate_chapters(&book.id).await;
                pb.finish_and_clear();
                match result {
                    Ok(_) => {
                        if let Some(book) = store.get(&book.id) {
                            print_book(book);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("{}", e);
                        println!(
                            "Failed to load content for \"{}\". Please check your connection and try again.",
                            book.title
                        );
                    }
                }
            }
            "" => {}
            other => println!("Unknown command '{}'. {}", other, HELP),
        }
    }
    Ok(())
}
