//! URL handling module for Click-Distance
//!
//! Syntactic helpers shared by target preparation and link filtering. Nothing
//! here touches the network; redirect resolution lives in the navigation core.

mod filter;
mod scheme;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use filter::{is_document_url, is_skipped_link, strip_fragment, within_root};
pub use scheme::scheme_counterpart;

/// Parses an absolute http(s) URL
///
/// # Examples
///
/// ```
/// use click_distance::url::parse_http_url;
///
/// assert!(parse_http_url("https://shc.example.edu/").is_ok());
/// assert!(parse_http_url("ftp://shc.example.edu/").is_err());
/// ```
pub fn parse_http_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
