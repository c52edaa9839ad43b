// src/main.rs
mod browser;
mod config;
mod edgar;
mod extractors;
mod pipeline;
mod storage;
mod utils;

use browser::{BrowserLauncher, ChromiumLauncher};
use clap::{Parser, ValueEnum};
use config::{CompanyTable, PagerConfig, SearchWaits};
use edgar::client::{EdgarClient, DEFAULT_USER_AGENT};
use pipeline::{BrowserFetcher, CompanyRunLoop, DocumentFetcher, HttpFetcher, SearchPager};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use storage::StorageManager;
use utils::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FetchMode {
    /// Read each document in its own browser instance
    Browser,
    /// Download each document over plain HTTP
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WaitMode {
    /// Fixed settle delays around the search commit keystroke
    Settle,
    /// Poll for the results table instead
    Poll,
}

/// Saves the text of each company's annual 10-K filings, one file per fiscal year
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output directory for extracted text
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// JSON company table: [{"name": "...", "ticker": "..."}]
    #[arg(short, long)]
    companies: Option<PathBuf>,

    /// Only process these companies (repeatable)
    #[arg(long)]
    only: Vec<String>,

    /// Result pages to visit per company
    #[arg(long, default_value_t = 3)]
    max_pages: u32,

    /// How filing documents are fetched
    #[arg(long, value_enum, default_value_t = FetchMode::Browser)]
    fetch_mode: FetchMode,

    /// How result pages are waited on
    #[arg(long, value_enum, default_value_t = WaitMode::Settle)]
    wait: WaitMode,

    /// Timeout for --wait poll, in milliseconds
    #[arg(long, default_value_t = 10_000)]
    poll_timeout_ms: u64,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Chromium executable (otherwise CHROME_PATH or PATH)
    #[arg(long)]
    chrome_path: Option<PathBuf>,

    /// User-Agent for --fetch-mode http
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Write a JSON metadata file next to each text file
    #[arg(long)]
    metadata: bool,

    /// Debug-level logging unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    utils::logging::setup_logging(if args.verbose { "debug" } else { "info" });
    tracing::info!("Starting run with args: {:?}", args);

    if args.max_pages == 0 {
        return Err(AppError::Config("--max-pages must be at least 1".to_string()));
    }

    let companies = match &args.companies {
        Some(path) => CompanyTable::from_file(path)?,
        None => CompanyTable::default(),
    }
    .filtered(&args.only)?;
    tracing::info!("{} companies to process", companies.entries().len());

    let storage = StorageManager::new(&args.output_dir)?.with_metadata(args.metadata);

    let pager_config = PagerConfig {
        max_pages: args.max_pages,
        waits: match args.wait {
            WaitMode::Settle => SearchWaits::default(),
            WaitMode::Poll => SearchWaits::polling(Duration::from_millis(args.poll_timeout_ms)),
        },
        ..PagerConfig::default()
    };

    let launcher: Arc<dyn BrowserLauncher> =
        Arc::new(ChromiumLauncher::new(args.headed, args.chrome_path.clone()));

    let fetcher: Box<dyn DocumentFetcher> = match args.fetch_mode {
        FetchMode::Browser => Box::new(BrowserFetcher::new(Arc::clone(&launcher))),
        FetchMode::Http => Box::new(HttpFetcher::new(EdgarClient::new(&args.user_agent)?)),
    };

    let mut search_browser = launcher.launch().await?;
    let run_loop = CompanyRunLoop::new(SearchPager::new(&pager_config, fetcher.as_ref(), &storage));
    let report = run_loop.run(search_browser.as_mut(), &companies).await;

    if let Err(e) = search_browser.close().await {
        tracing::warn!("Failed to close search browser: {}", e);
    }

    let failed = report.failed_companies();
    tracing::info!(
        "Processing finished. Files written: {}, companies failed: {}",
        report.files_written(),
        failed.len()
    );
    if !failed.is_empty() {
        tracing::warn!("Failed companies: {}", failed.join(", "));
    }

    if report.all_failed() {
        return Err(AppError::Processing(format!(
            "All {} companies failed",
            report.companies.len()
        )));
    }

    Ok(())
}
