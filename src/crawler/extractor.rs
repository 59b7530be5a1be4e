//! Link extraction: the crawl engine's only view of the network
//!
//! The engine hands a canonical URL to a `LinkExtractor` and gets back the
//! absolute URLs that page links to. Failure is not an error at this seam: a
//! page that cannot be fetched or parsed yields an empty list and becomes a
//! dead end in the crawl graph.

use crate::config::{HttpConfig, UserAgentConfig};
use crate::crawler::fetcher::{build_http_client, fetch_with_retry, FetchResult, RetryPolicy};
use crate::crawler::parser::parse_links;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Source of outgoing links for a page
///
/// # Contract
///
/// - Returned URLs are absolute, in page order, and may contain duplicates
/// - Relative references are resolved against `url`
/// - Every failure (network error, non-success status, timeout, unparsable
///   body) is reported as an empty list, never as an error
/// - Any retry policy lives inside the implementation; callers never retry
#[async_trait]
pub trait LinkExtractor: Send + Sync {
    /// Returns the links found on the page at `url`
    async fn extract_links(&self, url: &str) -> Vec<String>;
}

/// Production extractor: fetches pages over HTTP and parses `<a href>` links
#[derive(Debug, Clone)]
pub struct HttpLinkExtractor {
    client: Client,
    retry: RetryPolicy,
}

impl HttpLinkExtractor {
    /// Builds an extractor whose every request is bounded by `request_timeout`
    pub fn new(
        http: &HttpConfig,
        user_agent: &UserAgentConfig,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(http, user_agent, request_timeout)?;
        Ok(Self {
            client,
            retry: RetryPolicy::from(http),
        })
    }
}

#[async_trait]
impl LinkExtractor for HttpLinkExtractor {
    async fn extract_links(&self, url: &str) -> Vec<String> {
        let base_url = match Url::parse(url) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!("Request failed for {}: invalid URL: {}", url, e);
                return Vec::new();
            }
        };

        match fetch_with_retry(&self.client, url, self.retry).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                if final_url != url {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }
                // Links resolve against the requested URL, not the redirect target
                parse_links(&body, &base_url)
            }
            FetchResult::ContentMismatch { content_type } => {
                tracing::debug!("Skipping binary page {} ({})", url, content_type);
                Vec::new()
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Request failed for {}: HTTP {}", url, status_code);
                Vec::new()
            }
            FetchResult::NetworkError { error, .. } => {
                tracing::warn!("Request failed for {}: {}", url, error);
                Vec::new()
            }
        }
    }
}
