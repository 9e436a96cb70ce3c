/// Returns the http/https counterpart of a URL, if it has one
///
/// `https://` is tested first: every `https://` URL also contains `http`, so
/// checking the shorter scheme first would misclassify it. Every occurrence of
/// the scheme prefix is swapped.
///
/// # Examples
///
/// ```
/// use click_distance::url::scheme_counterpart;
///
/// assert_eq!(
///     scheme_counterpart("https://x.edu/page"),
///     Some("http://x.edu/page".to_string())
/// );
/// assert_eq!(
///     scheme_counterpart("http://x.edu/page"),
///     Some("https://x.edu/page".to_string())
/// );
/// assert_eq!(scheme_counterpart("x.edu/page"), None);
/// ```
pub fn scheme_counterpart(url: &str) -> Option<String> {
    if url.contains("https://") {
        Some(url.replace("https://", "http://"))
    } else if url.contains("http://") {
        Some(url.replace("http://", "https://"))
    } else {
        None
    }
}
