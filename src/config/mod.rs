//! Configuration module for Hostwalk
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section and key is optional, so an empty file is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use hostwalk::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("hostwalk.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.pool_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HttpConfig, UserAgentConfig, DEFAULT_POOL_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{validate, MAX_POOL_SIZE};
