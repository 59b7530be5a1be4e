use serde::Deserialize;

/// Default number of concurrently running crawl tasks
pub const DEFAULT_POOL_SIZE: usize = 32;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Main configuration structure for Hostwalk
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawl engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrently running fetch-and-discover tasks
    #[serde(rename = "pool-size", default = "default_pool_size")]
    pub pool_size: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// HTTP behavior of the link extractor
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Extra attempts after a 5xx response or a timeout
    #[serde(rename = "max-retries", default)]
    pub max_retries: u32,

    /// Delay between attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Redirect hops followed before giving up on a page
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_max_redirects() -> usize {
    10
}

fn default_crawler_name() -> String {
    "hostwalk".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
