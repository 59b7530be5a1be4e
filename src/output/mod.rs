//! Output module for presenting crawl results
//!
//! This module handles:
//! - Printing the visited-URL listing
//! - Displaying crawl statistics

mod report;
pub mod stats;

pub use report::{format_report, print_report, write_report};
pub use stats::{format_statistics, print_statistics};
