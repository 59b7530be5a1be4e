//! Visited-URL listing
//!
//! Prints the crawl result in the classic format: a count line followed by
//! one URL per line. URLs are sorted so repeated runs diff cleanly.

use crate::crawler::CrawlReport;
use std::io::{self, Write};

/// Formats the visited set of a crawl report
///
/// # Arguments
///
/// * `report` - The finished (or cancelled) crawl
///
/// # Returns
///
/// `Total URLs found: N` followed by the sorted URLs, one per line
pub fn format_report(report: &CrawlReport) -> String {
    let mut urls: Vec<&String> = report.visited.iter().collect();
    urls.sort();

    let mut out = format!("Total URLs found: {}\n", urls.len());
    for url in urls {
        out.push_str(url);
        out.push('\n');
    }
    out
}

/// Writes the formatted report to `writer`
pub fn write_report<W: Write>(report: &CrawlReport, writer: &mut W) -> io::Result<()> {
    writer.write_all(format_report(report).as_bytes())?;
    writer.flush()
}

/// Prints the formatted report to stdout
pub fn print_report(report: &CrawlReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(report, &mut handle)
}
