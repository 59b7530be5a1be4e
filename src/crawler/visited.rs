//! Visited store: the single synchronization point of the crawl
//!
//! Every canonical URL passes through `try_claim` exactly once per task that
//! sees it. The check and the insert happen under the same lock, so of any
//! number of concurrent callers with the same URL exactly one gets `true`.

use crate::CrawlError;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Thread-safe set of canonical URLs already claimed for processing
///
/// Entries are never removed.
#[derive(Debug, Default)]
pub struct VisitedStore {
    claimed: Mutex<HashSet<String>>,
}

impl VisitedStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a canonical URL
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The URL was not present and now belongs to the caller
    /// * `Ok(false)` - The URL was already claimed; nothing was changed
    /// * `Err(CrawlError::StoreCorrupted)` - A worker panicked while holding the lock
    pub fn try_claim(&self, canonical_url: &str) -> Result<bool, CrawlError> {
        let mut claimed = self.lock()?;
        if claimed.contains(canonical_url) {
            return Ok(false);
        }
        claimed.insert(canonical_url.to_string());
        Ok(true)
    }

    /// Returns a copy of every claimed URL
    ///
    /// Only meaningful once the crawl has terminated; while tasks are still
    /// running the result is a moving target.
    pub fn snapshot(&self) -> Result<HashSet<String>, CrawlError> {
        Ok(self.lock()?.clone())
    }

    /// Returns the number of claimed URLs
    pub fn len(&self) -> Result<usize, CrawlError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashSet<String>>, CrawlError> {
        self.claimed.lock().map_err(|_| CrawlError::StoreCorrupted)
    }
}
