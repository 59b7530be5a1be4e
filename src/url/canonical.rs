/// Produces the canonical comparison key for a URL
///
/// The only transformation is dropping the fragment: the input is truncated
/// at the first `#`. Trailing slashes, letter case, ports and query ordering
/// are all left exactly as they were, so `/a` and `/a/` remain distinct pages.
///
/// # Examples
///
/// ```
/// use hostwalk::url::canonicalize;
///
/// assert_eq!(canonicalize("https://example.com/page#intro"), "https://example.com/page");
/// assert_eq!(canonicalize("https://example.com/page"), "https://example.com/page");
/// ```
pub fn canonicalize(url: &str) -> String {
    match url.find('#') {
        Some(idx) => url[..idx].to_string(),
        None => url.to_string(),
    }
}
