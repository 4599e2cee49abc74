//! View command implementation

use super::open_store;
use anyhow::{bail, Context, Result};
use ergoreader_core::pager::{LopdfEngine, TextSurface};
use ergoreader_core::{Config, NavKey, PageController, PagerState};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Render a page of an uploaded document, optionally paging interactively
pub async fn view(config: &Config, id: &str, page: u32, interactive: bool) -> Result<()> {
    let store = open_store(config).await?;
    let book = store
        .get(id)
        .with_context(|| format!("No uploaded book with id {}", id))?;
    if !book.is_user() {
        bail!("'{}' is a catalog book; use `ergoreader read` instead", book.title);
    }

    let mut controller = PageController::new(Arc::new(LopdfEngine::new()));
    if let PagerState::Failed { reason } = controller.activate(book).await {
        bail!(reason);
    }

    while controller.page() < page && controller.next() {}

    let mut surface = TextSurface::new();
    show(&mut controller, &mut surface).await?;

    if !interactive {
        return Ok(());
    }

    println!("[n]ext, [p]revious, [q]uit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let key = match line.trim().to_lowercase().as_str() {
            "q" | "quit" => break,
            "n" | "next" | "right" => NavKey::Right,
            "p" | "prev" | "previous" | "left" => NavKey::Left,
            _ => NavKey::Other,
        };
        if controller.handle_key(key) {
            show(&mut controller, &mut surface).await?;
        }
    }
    Ok(())
}

async fn show(controller: &mut PageController, surface: &mut TextSurface) -> Result<()> {
    if let Err(e) = controller.render_current(surface).await {
        tracing::debug!("Render error: {}", e);
    }
    match controller.state() {
        PagerState::Ready { page, page_count } => {
            println!("--- Page {} of {} ---", page, page_count);
            println!("{}", surface.text());
            Ok(())
        }
        PagerState::Failed { reason } => bail!(reason),
        _ => Ok(()),
    }
}
