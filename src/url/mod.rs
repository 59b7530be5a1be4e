//! URL handling module
//!
//! This module provides the two URL primitives the crawl engine relies on:
//! canonicalization (fragment stripping) and host scoping.

mod canonical;
mod scope;

// Re-export main functions
pub use canonical::canonicalize;
pub use scope::{host_of, in_scope};
