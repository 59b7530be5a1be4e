//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeout
//! - GET requests to fetch page content
//! - Retry logic for transient failures
//! - Error classification

use crate::config::{HttpConfig, UserAgentConfig};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched a page whose body can be scanned for links
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Page is binary media (images, archives, fonts, ...) and has no links
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body decode, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request hit the configured timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// Returns true for failures that may succeed on a later attempt
    ///
    /// Only server errors and timeouts qualify; a 404 or a refused
    /// connection will not fix itself within a crawl.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError { status_code } => *status_code >= 500,
            Self::NetworkError { timed_out, .. } => *timed_out,
            _ => false,
        }
    }
}

/// Retry settings for a single page
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl From<&HttpConfig> for RetryPolicy {
    fn from(config: &HttpConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `http` - Redirect settings
/// * `user_agent` - The user agent configuration
/// * `request_timeout` - Upper bound on each request, connect through body
///
/// # Example
///
/// ```no_run
/// use hostwalk::config::{HttpConfig, UserAgentConfig};
/// use hostwalk::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(
///     &HttpConfig::default(),
///     &UserAgentConfig::default(),
///     Duration::from_secs(5),
/// )
/// .unwrap();
/// ```
pub fn build_http_client(
    http: &HttpConfig,
    user_agent: &UserAgentConfig,
    request_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(request_timeout)
        .connect_timeout(request_timeout)
        .redirect(Policy::limited(http.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with a textual (or no) Content-Type | Success |
/// | 2xx with a binary Content-Type | ContentMismatch |
/// | Any other status | HttpError |
/// | Timeout | NetworkError (timed_out) |
/// | Connection / TLS / body error | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    // Mislabelled pages are common, so anything not clearly binary is parsed
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if is_binary(&content_type) {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => classify_error(e),
    }
}

/// Fetches a URL, retrying transient failures according to `policy`
pub async fn fetch_with_retry(client: &Client, url: &str, policy: RetryPolicy) -> FetchResult {
    let mut attempt = 0;
    loop {
        let result = fetch_url(client, url).await;
        if attempt >= policy.max_retries || !result.is_retryable() {
            return result;
        }

        attempt += 1;
        tracing::debug!(
            "Retrying {} (attempt {}/{}) after {:?}",
            url,
            attempt,
            policy.max_retries,
            result
        );
        tokio::time::sleep(policy.delay).await;
    }
}

fn is_binary(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    ["image/", "audio/", "video/", "font/"]
        .iter()
        .any(|prefix| mime.starts_with(prefix))
        || matches!(
            mime.as_str(),
            "application/octet-stream"
                | "application/pdf"
                | "application/zip"
                | "application/gzip"
                | "application/x-tar"
                | "application/wasm"
        )
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            timed_out: false,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            timed_out: false,
        }
    }
}
