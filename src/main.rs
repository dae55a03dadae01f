use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use booktracker::catalog::CatalogClient;
use booktracker::page::{PageController, PageSession};
use booktracker::session::SessionCacheStore;
use booktracker::{App, Config};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "booktracker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides config)
    #[arg(long)]
    backend: Option<String>,

    /// How many similar books to request (overrides config)
    #[arg(long)]
    limit: Option<usize>,

    /// Title, author or ISBN of the book to open
    #[arg(required = true)]
    search: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to a file; the terminal belongs to the TUI
    let log_file = Config::open_log(&Config::log_path()?)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booktracker=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(backend) = cli.backend {
        config.backend_url = backend;
    }
    if let Some(limit) = cli.limit {
        config.similar_books_limit = limit;
    }

    let client = Arc::new(config.catalog_client()?);
    let book = find_book(&client, &cli.search.join(" ")).await?;

    let controller = PageController::new(SessionCacheStore::default(), config.page_settings());
    let page = PageSession::new(controller, client.clone(), client);

    let mut app = App::new(page)?;
    app.run(book).await?;

    Ok(())
}

/// First search hit, or `None` so the page renders "Book not found"
async fn find_book(client: &CatalogClient, query: &str) -> Result<Option<booktracker::book::Book>> {
    let books = client
        .search_books(query, 5)
        .await
        .with_context(|| format!("Failed to search for {:?}", query))?;
    if books.is_empty() {
        tracing::info!(query, "no book matched");
    }
    Ok(books.into_iter().next())
}
