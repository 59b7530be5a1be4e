//! HTML parser for extracting hyperlinks
//!
//! Only `<a href>` targets are collected. They come back absolute, in
//! document order, with duplicates and fragments left in place; deduplication,
//! fragment stripping and host scoping belong to the crawl engine.

use scraper::{Html, Selector};
use url::Url;

/// Parses HTML content and returns every link as an absolute URL
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, resolved against `base_url`,
///   whatever its scheme (`mailto:` and friends have no host and fall out at
///   the scope check; a same-host `ftp:` link is kept and fails at fetch time)
///
/// **Exclude:**
/// - Empty and fragment-only hrefs (`#section`), which point back at the page
/// - Hrefs that cannot be resolved to a URL
///
/// # Example
///
/// ```
/// use hostwalk::crawler::parse_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(parse_links(html, &base_url), vec!["https://example.com/page"]);
/// ```
pub fn parse_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL
///
/// Returns None for self-references and hrefs the `url` crate rejects.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    base_url.join(href).ok().map(|absolute_url| absolute_url.to_string())
}
