use url::Url;

/// Extracts the host component of a URL string
///
/// Returns `None` when the string does not parse as an absolute URL or the
/// URL has no host (e.g. `mailto:` links).
///
/// # Examples
///
/// ```
/// use hostwalk::url::host_of;
///
/// assert_eq!(host_of("https://example.com:8080/path"), Some("example.com".to_string()));
/// assert_eq!(host_of("mailto:someone@example.com"), None);
/// assert_eq!(host_of("not a url"), None);
/// ```
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

/// Returns true if `url` belongs to the crawl's root host
///
/// The comparison is exact string equality on the parsed host. Malformed URLs
/// are out of scope rather than errors.
pub fn in_scope(url: &str, root_host: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str() == Some(root_host),
        Err(_) => false,
    }
}
