/// Outcome definitions for crawl tasks
///
/// Every task moves through `ENQUEUED -> RUNNING` and then lands in exactly
/// one of the outcomes below.
use std::fmt;

/// Represents how a single fetch-and-discover task finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOutcome {
    /// The task claimed its URL, fetched it and submitted its links
    Expanded {
        /// Number of links returned by the extractor (duplicates included)
        links: usize,
    },

    /// Another task had already claimed the same canonical URL
    SkippedDuplicate,

    /// The URL's host differs from the crawl root or could not be parsed
    SkippedOutOfScope,

    /// Cancellation fired before the task could finish its work
    Abandoned,
}

impl TaskOutcome {
    /// Short label used in logs and statistics output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expanded { .. } => "expanded",
            Self::SkippedDuplicate => "skipped_duplicate",
            Self::SkippedOutOfScope => "skipped_out_of_scope",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expanded { links } => write!(f, "expanded ({} links)", links),
            other => write!(f, "{}", other.label()),
        }
    }
}
