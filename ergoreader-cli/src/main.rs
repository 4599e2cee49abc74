//! ErgoReader CLI - terminal front end for the reading library

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ergoreader_core::types::ALL_CATEGORIES;
use ergoreader_core::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate a page number (must be at least 1)
fn parse_page(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{}' is not a valid page number", s))?;
    if n < 1 {
        Err("page must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "ergoreader")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the local shelf (overrides ERGOREADER_STORAGE_PATH)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Catalog API key (overrides ERGOREADER_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the generated catalog together with uploaded books
    Catalog {
        /// Case-insensitive title or author filter
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category to show
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read the first catalog book whose title or author matches a query
    Read {
        /// Title or author to look for
        query: String,
    },

    /// Browse the library interactively in one session
    Browse,

    /// Add a PDF to the local shelf
    Upload {
        /// PDF file path
        input: PathBuf,
    },

    /// List uploaded books without contacting the catalog service
    Shelf {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a page of an uploaded PDF
    View {
        /// Book id as shown by `shelf`
        id: String,

        /// Page to show (clamped to the document)
        #[arg(short, long, default_value = "1", value_parser = parse_page)]
        page: u32,

        /// Page through the document with n/p on stdin
        #[arg(short, long)]
        interactive: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "ergoreader_cli=debug,ergoreader_core=debug"
    } else {
        "ergoreader_cli=info,ergoreader_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(storage) = cli.storage {
        config = config.with_storage_path(storage);
    }
    if let Some(api_key) = cli.api_key {
        config = config.with_api_key(api_key);
    }

    match cli.command {
        Commands::Catalog {
            search,
            category,
            json,
        } => commands::catalog(&config, &search, &category, json).await,

        Commands::Read { query } => commands::read(&config, &query).await,

        Commands::Browse => commands::browse(&config).await,

        Commands::Upload { input } => commands::upload(&config, &input).await,

        Commands::Shelf { json } => commands::shelf(&config, json).await,

        Commands::View {
            id,
            page,
            interactive,
        } => commands::view(&config, &id, page, interactive).await,
    }
}
