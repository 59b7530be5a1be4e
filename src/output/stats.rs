//! Crawl statistics display
//!
//! This module formats the per-outcome task counters collected during a
//! crawl for the `--stats` flag.

use crate::crawler::CrawlReport;

/// Formats statistics of a crawl report
///
/// # Arguments
///
/// * `report` - The finished (or cancelled) crawl
///
/// # Returns
///
/// A multi-line, human-readable summary
pub fn format_statistics(report: &CrawlReport) -> String {
    let stats = &report.stats;
    let mut out = String::new();

    out.push_str("=== Crawl Statistics ===\n\n");

    out.push_str("Overview:\n");
    out.push_str(&format!("  Start URL: {}\n", report.start_url));
    out.push_str(&format!(
        "  Host: {}\n",
        report.root_host.as_deref().unwrap_or("(none)")
    ));
    out.push_str(&format!("  Pages visited: {}\n", report.visited.len()));
    out.push_str(&format!("  Links discovered: {}\n", stats.links_discovered));
    out.push_str(&format!(
        "  Duration: {:.2} seconds\n",
        report.elapsed.as_secs_f64()
    ));
    if report.cancelled {
        out.push_str("  Status: cancelled (partial result)\n");
    } else {
        out.push_str("  Status: completed\n");
    }
    out.push('\n');

    out.push_str("Tasks by Outcome:\n");
    let finished = stats.tasks_finished();
    for (label, count) in [
        ("Expanded", stats.expanded),
        ("Skipped (duplicate)", stats.skipped_duplicate),
        ("Skipped (out of scope)", stats.skipped_out_of_scope),
        ("Abandoned", stats.abandoned),
    ] {
        let percentage = if finished > 0 {
            (count as f64 / finished as f64) * 100.0
        } else {
            0.0
        };
        out.push_str(&format!("  {}: {} ({:.1}%)\n", label, count, percentage));
    }
    out.push_str(&format!("  Total submitted: {}\n", stats.tasks_submitted));

    if report.elapsed.as_secs_f64() > 0.0 {
        out.push('\n');
        out.push_str(&format!(
            "Throughput: {:.1} pages/second\n",
            stats.expanded as f64 / report.elapsed.as_secs_f64()
        ));
    }

    out
}

/// Prints statistics to stderr in a formatted manner
///
/// Statistics go to stderr so stdout stays a clean URL listing.
pub fn print_statistics(report: &CrawlReport) {
    eprint!("{}", format_statistics(report));
}
