//! Crawl-wide counters
//!
//! These are reporting only. Termination never depends on them; the worker
//! pool's outstanding-task counter is the single source of truth for that.

use crate::state::TaskOutcome;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters shared by every task of one crawl
#[derive(Debug, Default)]
pub struct CrawlStats {
    tasks_submitted: AtomicU64,
    expanded: AtomicU64,
    skipped_duplicate: AtomicU64,
    skipped_out_of_scope: AtomicU64,
    abandoned: AtomicU64,
    links_discovered: AtomicU64,
}

/// Point-in-time copy of `CrawlStats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Total tasks accepted by the worker pool
    pub tasks_submitted: u64,

    /// Tasks that claimed and expanded their URL
    pub expanded: u64,

    /// Tasks that lost the claim race or found the URL already visited
    pub skipped_duplicate: u64,

    /// Tasks whose URL was off-host or malformed
    pub skipped_out_of_scope: u64,

    /// Tasks cut short by cancellation
    pub abandoned: u64,

    /// Links returned by the extractor across all pages
    pub links_discovered: u64,
}

impl CrawlStats {
    /// Creates a zeroed set of counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a task was accepted by the pool
    pub fn record_submitted(&self) {
        self.tasks_submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Records the outcome of a finished task
    pub fn record_outcome(&self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Expanded { links } => {
                self.expanded.fetch_add(1, Ordering::Relaxed);
                self.links_discovered
                    .fetch_add(links as u64, Ordering::Relaxed);
            }
            TaskOutcome::SkippedDuplicate => {
                self.skipped_duplicate.fetch_add(1, Ordering::Relaxed);
            }
            TaskOutcome::SkippedOutOfScope => {
                self.skipped_out_of_scope.fetch_add(1, Ordering::Relaxed);
            }
            TaskOutcome::Abandoned => {
                self.abandoned.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Copies the current counter values
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            tasks_submitted: self.tasks_submitted.load(Ordering::Relaxed),
            expanded: self.expanded.load(Ordering::Relaxed),
            skipped_duplicate: self.skipped_duplicate.load(Ordering::Relaxed),
            skipped_out_of_scope: self.skipped_out_of_scope.load(Ordering::Relaxed),
            abandoned: self.abandoned.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
        }
    }
}

impl StatsSnapshot {
    /// Number of tasks that reached a final outcome
    pub fn tasks_finished(&self) -> u64 {
        self.expanded + self.skipped_duplicate + self.skipped_out_of_scope + self.abandoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = CrawlStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_record_outcomes() {
        let stats = CrawlStats::new();
        for _ in 0..4 {
            stats.record_submitted();
        }
        stats.record_outcome(TaskOutcome::Expanded { links: 5 });
        stats.record_outcome(TaskOutcome::Expanded { links: 2 });
        stats.record_outcome(TaskOutcome::SkippedDuplicate);
        stats.record_outcome(TaskOutcome::SkippedOutOfScope);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.tasks_submitted, 4);
        assert_eq!(snapshot.expanded, 2);
        assert_eq!(snapshot.links_discovered, 7);
        assert_eq!(snapshot.skipped_duplicate, 1);
        assert_eq!(snapshot.skipped_out_of_scope, 1);
        assert_eq!(snapshot.abandoned, 0);
        assert_eq!(snapshot.tasks_finished(), 4);
    }

    #[test]
    fn test_record_abandoned() {
        let stats = CrawlStats::new();
        stats.record_outcome(TaskOutcome::Abandoned);
        assert_eq!(stats.snapshot().abandoned, 1);
        assert_eq!(stats.snapshot().expanded, 0);
    }
}
