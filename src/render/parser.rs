//! HTML link extraction
//!
//! Pulls hyperlink targets out of static HTML the way a browser would report
//! them through the `href` property: absolute, resolved against the page URL.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
///
/// Links are returned in document order; duplicates are kept.
///
/// # Example
///
/// ```
/// use click_distance::render::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/std-testing">Testing</a></body></html>"#;
/// let base_url = Url::parse("https://shc.example.edu/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links, vec!["https://shc.example.edu/std-testing".to_string()]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_link(href, base_url) {
                links.push(absolute_url);
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://shc.example.edu/services/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.edu/page">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://other.edu/page".to_string()]);
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://shc.example.edu/other".to_string()]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let html = r#"<html><body><a href="other">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(
            links,
            vec!["https://shc.example.edu/services/other".to_string()]
        );
    }

    #[test]
    fn test_fragment_kept_on_page_links() {
        let html = r#"<html><body><a href="/hours#weekend">Hours</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(
            links,
            vec!["https://shc.example.edu/hours#weekend".to_string()]
        );
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"
            <html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="JavaScript:alert(1)">JS</a>
                <a href="mailto:health@example.edu">Email</a>
                <a href="tel:+1234567890">Call</a>
                <a href="data:text/html,<h1>Test</h1>">Data</a>
                <a href="ftp://files.example.edu/x">FTP</a>
            </body></html>
        "#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_skip_download_and_fragment_only() {
        let html = r##"
            <html><body>
                <a href="/file.pdf" download>Download</a>
                <a href="#section">Jump</a>
                <a href="">Empty</a>
            </body></html>
        "##;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_document_order_and_duplicates_preserved() {
        let html = r#"
            <html>
            <body>
                <nav><a href="/b">B</a></nav>
                <a href="/a">A</a>
                <footer><a href="/b">B again</a></footer>
            </body>
            </html>
        "#;
        let links = extract_links(html, &base_url());
        assert_eq!(
            links,
            vec![
                "https://shc.example.edu/b".to_string(),
                "https://shc.example.edu/a".to_string(),
                "https://shc.example.edu/b".to_string(),
            ]
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<html><body><a name="top">Top</a><a href="/x">X</a></body></html>"#;
        assert_eq!(extract_links(html, &base_url()).len(), 1);
    }
}
