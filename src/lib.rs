//! Hostwalk: a concurrent same-host web crawler
//!
//! Starting from a single URL, this crate discovers and visits every page
//! reachable on the starting host through a single bounded worker pool, and
//! returns the set of visited canonical URLs.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Page-level failures never show up here: the link extractor absorbs them.
/// Only conditions that make the crawl result untrustworthy are surfaced.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Visited store is corrupted: a worker panicked while holding its lock")]
    StoreCorrupted,

    #[error("Outstanding task counter dropped below zero")]
    CounterUnderflow,

    #[error("Worker pool is closed and no longer accepts tasks")]
    PoolClosed,

    #[error("Crawl task panicked: {0}")]
    TaskPanicked(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, run_crawl, CancelSignal, CrawlReport, LinkExtractor};
pub use state::{CrawlStats, TaskOutcome};
pub use crate::url::{canonicalize, host_of, in_scope};
