//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML parsing and link extraction
//! - The bounded worker pool and visited-URL store
//! - Overall crawl coordination and cancellation

mod cancel;
mod coordinator;
mod extractor;
mod fetcher;
mod parser;
mod pool;
mod visited;

pub use cancel::CancelSignal;
pub use coordinator::{crawl, run_crawl, Coordinator, CrawlReport};
pub use extractor::{HttpLinkExtractor, LinkExtractor};
pub use fetcher::{build_http_client, fetch_url, fetch_with_retry, FetchResult, RetryPolicy};
pub use parser::parse_links;
pub use pool::WorkerPool;
pub use visited::VisitedStore;
