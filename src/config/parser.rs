//! Reading `hostwalk.toml` from disk
//!
//! The file is read once; the same bytes feed both the TOML parser and the
//! SHA-256 digest that the CLI logs, so the hash always describes exactly the
//! settings the crawl ran with.

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates a crawler configuration file
///
/// Missing sections and keys fall back to their defaults, so an empty file
/// yields `Config::default()`.
///
/// # Errors
///
/// * `ConfigError::Io` - The file could not be read
/// * `ConfigError::Parse` - The file is not valid TOML for this schema
/// * `ConfigError::Validation` / `ConfigError::InvalidUrl` - A value is out of range
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use hostwalk::config::load_config;
///
/// let config = load_config(Path::new("hostwalk.toml")).unwrap();
/// println!("Pool size: {}", config.crawler.pool_size);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Hex-encoded SHA-256 digest of the configuration file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(digest_hex(&content))
}

/// Like `load_config`, also returning the digest of the bytes that were parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, digest_hex(&content)))
}

fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn digest_hex(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
