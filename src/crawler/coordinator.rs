//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the per-URL task procedure and the crawl-level
//! driver that seeds the pool, waits for global termination and collects
//! the result, including:
//! - Canonicalizing and scope-checking each discovered URL
//! - Claiming URLs in the visited store
//! - Feeding extracted links back into the shared worker pool
//! - Handling cancellation and crawl-fatal errors

use crate::config::{Config, HttpConfig, UserAgentConfig, MAX_POOL_SIZE};
use crate::crawler::cancel::CancelSignal;
use crate::crawler::extractor::{HttpLinkExtractor, LinkExtractor};
use crate::crawler::pool::WorkerPool;
use crate::crawler::visited::VisitedStore;
use crate::state::{CrawlStats, StatsSnapshot, TaskOutcome};
use crate::url::{canonicalize, host_of, in_scope};
use crate::{ConfigError, CrawlError};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How often (in claimed pages) progress is logged
const PROGRESS_INTERVAL: usize = 25;

/// Final result of a crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The URL the crawl started from, as given
    pub start_url: String,

    /// Host every visited URL belongs to; `None` when the start URL has no host
    pub root_host: Option<String>,

    /// Canonical URLs claimed during the crawl
    pub visited: HashSet<String>,

    /// Per-outcome task counters
    pub stats: StatsSnapshot,

    /// Whether the crawl was cut short by cancellation
    pub cancelled: bool,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

/// State shared by every task of one crawl
struct CrawlContext {
    root_host: Option<String>,
    visited: VisitedStore,
    extractor: Arc<dyn LinkExtractor>,
    stats: CrawlStats,
    cancel: CancelSignal,
}

/// Main crawler coordinator structure
///
/// Owns the single worker pool of the crawl. Consumed by `run`, so a
/// coordinator drives exactly one crawl.
pub struct Coordinator {
    start_url: String,
    root_host: Option<String>,
    pool: WorkerPool,
    extractor: Arc<dyn LinkExtractor>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `start_url` - URL the crawl starts from; its host scopes the crawl
    /// * `concurrency` - Maximum number of tasks fetching at the same time
    /// * `extractor` - Source of outgoing links for each claimed page
    ///
    /// A start URL without a host is not an error: its task is out of scope
    /// and the crawl ends with an empty result.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - `concurrency` is outside `1..=MAX_POOL_SIZE`
    pub fn new(
        start_url: &str,
        concurrency: usize,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Result<Self, CrawlError> {
        if concurrency == 0 || concurrency > MAX_POOL_SIZE {
            return Err(ConfigError::Validation(format!(
                "concurrency must be between 1 and {}, got {}",
                MAX_POOL_SIZE, concurrency
            ))
            .into());
        }

        let root_host = host_of(start_url);
        if root_host.is_none() {
            tracing::warn!("Start URL {} has no host; nothing will be crawled", start_url);
        }

        Ok(Self {
            start_url: start_url.to_string(),
            root_host,
            pool: WorkerPool::new(concurrency),
            extractor,
        })
    }

    /// Runs the crawl until natural termination or cancellation
    ///
    /// Termination is detected when the pool's outstanding-task counter
    /// reaches zero; at that point no task exists that could discover more
    /// work, so the visited store is final and safe to read.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl finished or was cancelled
    /// * `Err(CrawlError)` - A crawl-fatal invariant violation aborted the crawl
    pub async fn run(self, cancel: CancelSignal) -> Result<CrawlReport, CrawlError> {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} (host {}, {} workers)",
            self.start_url,
            self.root_host.as_deref().unwrap_or("none"),
            self.pool.size()
        );

        let ctx = Arc::new(CrawlContext {
            root_host: self.root_host.clone(),
            visited: VisitedStore::new(),
            extractor: Arc::clone(&self.extractor),
            stats: CrawlStats::new(),
            cancel: cancel.clone(),
        });

        if !cancel.is_cancelled() {
            submit_url(&self.pool, &ctx, self.start_url.clone())?;
        }

        let mut cancelled = tokio::select! {
            result = self.pool.join() => {
                result?;
                false
            }
            _ = cancel.cancelled() => {
                tracing::info!(
                    "Cancellation requested, draining {} outstanding tasks",
                    self.pool.outstanding()
                );
                self.pool.close();
                self.pool.join().await?;
                true
            }
        };
        cancelled |= cancel.is_cancelled();

        let visited = ctx.visited.snapshot()?;
        let stats = ctx.stats.snapshot();
        let elapsed = start_time.elapsed();

        if cancelled {
            tracing::info!(
                "Crawl cancelled: {} pages visited in {:?}",
                visited.len(),
                elapsed
            );
        } else {
            tracing::info!(
                "Crawl completed: {} pages visited in {:?}",
                visited.len(),
                elapsed
            );
        }

        Ok(CrawlReport {
            start_url: self.start_url,
            root_host: self.root_host,
            visited,
            stats,
            cancelled,
            elapsed,
        })
    }
}

/// Queues one fetch-and-discover task for `url` on the shared pool
fn submit_url(pool: &WorkerPool, ctx: &Arc<CrawlContext>, url: String) -> Result<(), CrawlError> {
    let task_pool = pool.clone();
    let task_ctx = Arc::clone(ctx);

    pool.submit(async move {
        let outcome = process_url(&task_pool, &task_ctx, &url).await;
        tracing::trace!("{}: {}", url, outcome);
        task_ctx.stats.record_outcome(outcome);
    })?;

    ctx.stats.record_submitted();
    Ok(())
}

/// Processes a single URL
///
/// This method:
/// 1. Canonicalizes the URL
/// 2. Drops it if it is off-host
/// 3. Claims it, dropping it if another task already did
/// 4. Extracts its links
/// 5. Submits one task per link
async fn process_url(pool: &WorkerPool, ctx: &Arc<CrawlContext>, url: &str) -> TaskOutcome {
    if ctx.cancel.is_cancelled() {
        return TaskOutcome::Abandoned;
    }

    let canonical = canonicalize(url);

    let scoped = ctx
        .root_host
        .as_deref()
        .is_some_and(|root_host| in_scope(&canonical, root_host));
    if !scoped {
        tracing::trace!("Out of scope: {}", canonical);
        return TaskOutcome::SkippedOutOfScope;
    }

    match ctx.visited.try_claim(&canonical) {
        Ok(true) => {}
        Ok(false) => {
            tracing::trace!("Already claimed: {}", canonical);
            return TaskOutcome::SkippedDuplicate;
        }
        Err(e) => {
            pool.abort(e);
            return TaskOutcome::Abandoned;
        }
    }

    tracing::debug!("Claimed {}", canonical);
    match ctx.visited.len() {
        Ok(claimed) if claimed % PROGRESS_INTERVAL == 0 => {
            tracing::info!(
                "Progress: {} pages claimed, {} tasks outstanding",
                claimed,
                pool.outstanding()
            );
        }
        Ok(_) => {}
        Err(e) => {
            pool.abort(e);
            return TaskOutcome::Abandoned;
        }
    }

    let links = tokio::select! {
        links = ctx.extractor.extract_links(&canonical) => links,
        _ = ctx.cancel.cancelled() => {
            tracing::debug!("Abandoning fetch of {}", canonical);
            return TaskOutcome::Abandoned;
        }
    };

    let link_count = links.len();
    for link in links {
        if ctx.cancel.is_cancelled() {
            break;
        }
        // Submitting before this task completes keeps the counter above zero
        if let Err(e) = submit_url(pool, ctx, link) {
            tracing::debug!("Stopped submitting links from {}: {}", canonical, e);
            break;
        }
    }

    TaskOutcome::Expanded { links: link_count }
}

/// Crawls every page reachable from `start_url` on the same host
///
/// Uses the default HTTP settings with the given per-request timeout and
/// runs to natural termination.
///
/// # Arguments
///
/// * `start_url` - URL to start from; a URL without a host yields an empty set
/// * `concurrency` - Maximum number of simultaneous fetches
/// * `request_timeout_secs` - Per-request timeout in seconds
///
/// # Returns
///
/// The canonical (fragment-free) URLs visited, including `start_url` itself
///
/// # Example
///
/// ```no_run
/// # async fn example() -> Result<(), hostwalk::CrawlError> {
/// let pages = hostwalk::crawl("https://example.com/", 32, 5).await?;
/// println!("Total URLs found: {}", pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    start_url: &str,
    concurrency: usize,
    request_timeout_secs: u64,
) -> Result<HashSet<String>, CrawlError> {
    if request_timeout_secs == 0 {
        return Err(
            ConfigError::Validation("request timeout must be at least 1 second".to_string()).into(),
        );
    }

    let extractor = HttpLinkExtractor::new(
        &HttpConfig::default(),
        &UserAgentConfig::default(),
        Duration::from_secs(request_timeout_secs),
    )?;
    let coordinator = Coordinator::new(start_url, concurrency, Arc::new(extractor))?;
    let report = coordinator.run(CancelSignal::new()).await?;
    Ok(report.visited)
}

/// Runs a crawl with the full configuration and an external cancel signal
///
/// This is the entry point used by the command-line interface.
pub async fn run_crawl(
    config: &Config,
    start_url: &str,
    cancel: CancelSignal,
) -> Result<CrawlReport, CrawlError> {
    let extractor = HttpLinkExtractor::new(
        &config.http,
        &config.user_agent,
        Duration::from_secs(config.crawler.request_timeout),
    )?;
    let coordinator = Coordinator::new(start_url, config.crawler.pool_size, Arc::new(extractor))?;
    coordinator.run(cancel).await
}
