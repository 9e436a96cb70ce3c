use url::Url;

/// Target suffixes that cannot be reached by following rendered links
const DOCUMENT_SUFFIXES: &[&str] = &[".pdf", ".doc", ".docx"];

/// Outbound link suffixes that are never rendered as pages
const SKIPPED_LINK_SUFFIXES: &[&str] = &[".pdf", ".jpg", ".png"];

/// Drops an in-page fragment (`#...`) from a link
///
/// Only the last `#` is considered, matching how a browser reports `href`.
pub fn strip_fragment(link: &str) -> &str {
    match link.rsplit_once('#') {
        Some((head, _)) => head,
        None => link,
    }
}

/// Returns true if the URL's path names a document (`.pdf`, `.doc`, `.docx`)
///
/// The check is made on the path only, case-insensitively, so query strings
/// and fragments don't hide the extension. Unparseable URLs fall back to the
/// raw string with any query or fragment cut off.
pub fn is_document_url(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_lowercase(),
    };

    DOCUMENT_SUFFIXES
        .iter()
        .any(|suffix| path.ends_with(suffix))
}

/// Returns true if a (fragment-stripped) link points at a PDF or an image
pub fn is_skipped_link(link: &str) -> bool {
    SKIPPED_LINK_SUFFIXES
        .iter()
        .any(|suffix| link.ends_with(suffix))
}

/// Returns true if the link lies under the search root
///
/// Traversal stays on pages whose URL contains the root URL verbatim, which
/// restricts the search to the root's host and path prefix.
pub fn within_root(link: &str, root_url: &str) -> bool {
    link.contains(root_url)
}
