use crate::config::types::{Config, CrawlerConfig, HttpConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on the worker pool size
pub const MAX_POOL_SIZE: usize = 1024;

/// Upper bound on the per-request timeout (seconds)
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Upper bound on retry attempts per page
const MAX_RETRIES: u32 = 10;

/// Upper bound on redirect hops per page
const MAX_REDIRECTS: usize = 20;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.pool_size < 1 || config.pool_size > MAX_POOL_SIZE {
        return Err(ConfigError::Validation(format!(
            "pool_size must be between 1 and {}, got {}",
            MAX_POOL_SIZE, config.pool_size
        )));
    }

    if config.request_timeout < 1 || config.request_timeout > MAX_REQUEST_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be between 1 and {} seconds, got {}",
            MAX_REQUEST_TIMEOUT_SECS, config.request_timeout
        )));
    }

    Ok(())
}

/// Validates HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.max_retries > MAX_RETRIES {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= {}, got {}",
            MAX_RETRIES, config.max_retries
        )));
    }

    if config.max_redirects > MAX_REDIRECTS {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= {}, got {}",
            MAX_REDIRECTS, config.max_redirects
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}
