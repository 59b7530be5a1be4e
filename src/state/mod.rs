//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `TaskOutcome`: How a single fetch-and-discover task finished
//! - `CrawlStats`: Lock-free counters aggregated over all tasks of a crawl

mod stats;
mod task_outcome;

// Re-export main types
pub use stats::{CrawlStats, StatsSnapshot};
pub use task_outcome::TaskOutcome;
