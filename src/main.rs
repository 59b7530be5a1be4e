//! Hostwalk main entry point
//!
//! This is the command-line interface for the Hostwalk same-host crawler.

use anyhow::Context;
use clap::Parser;
use hostwalk::config::{load_config_with_hash, validate, Config};
use hostwalk::crawler::{run_crawl, CancelSignal};
use hostwalk::output::{print_report, print_statistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Hostwalk: a concurrent same-host web crawler
///
/// Hostwalk starts from a single URL, follows every `<a href>` link that
/// stays on the starting host, and prints each page it visited exactly once.
#[derive(Parser, Debug)]
#[command(name = "hostwalk")]
#[command(version)]
#[command(about = "A concurrent same-host web crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from; its host bounds the crawl
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum number of pages fetched at the same time [default: 32]
    #[arg(short = 'p', long, value_name = "N")]
    pool_size: Option<usize>,

    /// Per-request timeout in seconds [default: 5]
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print per-outcome task statistics after the URL listing
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    tracing::info!(
        "Pool size: {}, request timeout: {}s, max retries: {}",
        config.crawler.pool_size,
        config.crawler.request_timeout,
        config.http.max_retries
    );

    let cancel = CancelSignal::new();
    spawn_interrupt_handler(cancel.clone());

    let report = run_crawl(&config, &cli.url, cancel)
        .await
        .with_context(|| format!("Crawl of {} failed", cli.url))?;

    print_report(&report).context("Failed to write results")?;

    if cli.stats {
        print_statistics(&report);
    }

    if report.cancelled {
        eprintln!(
            "Crawl interrupted: listing is partial ({} pages visited before cancellation)",
            report.visited.len()
        );
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the URL listing.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hostwalk=info,warn"),
            1 => EnvFilter::new("hostwalk=debug,info"),
            2 => EnvFilter::new("hostwalk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(pool_size) = cli.pool_size {
        config.crawler.pool_size = pool_size;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout = timeout;
    }

    validate(&config).context("Invalid crawler settings")?;
    Ok(config)
}

/// Raises the cancel signal on the first Ctrl-C
fn spawn_interrupt_handler(cancel: CancelSignal) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("Interrupt received, stopping crawl");
                cancel.cancel();
            }
            Err(e) => {
                tracing::error!("Unable to listen for Ctrl-C: {}", e);
            }
        }
    });
}
